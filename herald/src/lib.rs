//! # herald - Journal and Throttled Dispatch for Moderation Agents
//!
//! `herald` is the event-distribution and outbound-throttling layer of a
//! chat moderation agent:
//!
//! - a hierarchical publish/subscribe **journal**: subsystems publish events
//!   at topic paths such as `/error/network` through a [`Broadcaster`], and
//!   [`Listener`]s subscribed to a path (or a whole subtree) filter and
//!   handle them;
//! - a single **dispatch queue** that serializes every outbound call and
//!   slows down as its backlog grows, so the agent never floods a
//!   rate-limited API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let journal = Journal::start(DispatchConfig::default());
//! journal.register(ChannelOutputListener::new(
//!     "/moderation",
//!     Channel::new(ChannelId(1234), "mod-log"),
//!     client,
//!     journal.queue().clone(),
//! ));
//!
//! let moderation = journal.broadcaster("/moderation");
//! moderation
//!     .send("ban", Some(guild), "Banned spammer", Attributes::new())
//!     .await;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Attributes
    AttributeValue,
    Attachment,
    Attributes,
    // Errors
    BoxError,
    // Context
    ChannelId,
    ConfigError,
    Context,
    ContextRef,
    DispatchError,
    // Listener
    DynListener,
    Embed,
    EmbedField,
    ErrorSink,
    // Event
    Event,
    HandleFuture,
    HeraldError,
    Listener,
    ListenerError,
    StaticContext,
    // Paths
    TopicPath,
    panic_message,
};

// Routing
pub use herald_std::routing::{Broadcaster, Delivery, Router};

// Dispatch
pub use herald_std::dispatch::{
    Action, DispatchConfig, DispatchHandle, DispatchQueue, DispatchWorker,
};

// Process context
pub use herald_std::journal::Journal;

// Re-exported for `Outbound` implementors
pub use herald_std::async_trait;

/// Standard listener implementations.
pub mod listeners {
    pub use herald_std::listeners::{
        Channel, ChannelOutputListener, Outbound, OutboundMessage, TracingListener,
    };
}

/// Standard error sinks.
pub mod sinks {
    pub use herald_std::sinks::{IgnoreSink, TracingSink};
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{Behavior, CollectingSink, RecordingListener, RecordingOutbound};
}

/// Prelude module - common imports for herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Attachment, Attributes, BoxError, Broadcaster, ChannelId, Context, ContextRef,
        DispatchConfig, DispatchHandle, Embed, ErrorSink, Event, Journal, Listener, Router,
        TopicPath,
        listeners::{Channel, ChannelOutputListener, Outbound, OutboundMessage},
    };
}
