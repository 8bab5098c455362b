//! Event contexts.
//!
//! Every event may carry the guild (or other grouping) it originated from.
//! The journal never looks inside a context; listeners do, to decide whether
//! an event concerns them. A chat client exposes its own guild type through
//! the [`Context`] trait, and [`StaticContext`] covers tests and tools that
//! have no live client.

use std::{collections::BTreeSet, fmt, sync::Arc};

/// Identifier of an output channel on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The grouping an event belongs to, e.g. a guild.
pub trait Context: fmt::Debug + Send + Sync + 'static {
    /// Platform identifier of the context.
    fn id(&self) -> u64;

    /// Human-readable name, used in log output.
    fn name(&self) -> &str;

    /// Whether `channel` belongs to this context.
    fn has_channel(&self, channel: ChannelId) -> bool;
}

/// A shared, type-erased context reference as carried by events.
pub type ContextRef = Arc<dyn Context>;

/// A fixed, in-memory [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContext {
    id: u64,
    name: String,
    channels: BTreeSet<ChannelId>,
}

impl StaticContext {
    /// Create a context without channels.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            channels: BTreeSet::new(),
        }
    }

    /// Add a channel to the context.
    pub fn with_channel(mut self, channel: ChannelId) -> Self {
        self.channels.insert(channel);
        self
    }

    /// Wrap the context for attaching to events.
    pub fn shared(self) -> ContextRef {
        Arc::new(self)
    }
}

impl Context for StaticContext {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_channel(&self, channel: ChannelId) -> bool {
        self.channels.contains(&channel)
    }
}
