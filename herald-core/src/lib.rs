//! # herald-core
//!
//! Core vocabulary for the herald journal.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! subsystems and listener implementations that don't need the full
//! `herald-std` machinery.
//!
//! # Pieces
//!
//! - [`TopicPath`] - Hierarchical, slash-delimited event keys
//! - [`Event`] - The ephemeral (path, context, content, attributes) tuple
//! - [`Attributes`] - Typed payload: embed, file, files and an extension map
//! - [`Context`] - The guild (or other grouping) an event belongs to
//! - [`Listener`] - The subscriber contract: `filter` then `handle`
//! - [`ErrorSink`] - Where isolated failures are reported
//!
//! # Error Types
//!
//! - [`HeraldError`] - Top-level error type
//! - [`ListenerError`] - Filter/handle failures
//! - [`DispatchError`] - Dispatch queue failures
//! - [`ConfigError`] - Configuration failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod attributes;
mod context;
mod error;
mod event;
mod listener;
mod path;
mod sink;

// Re-exports
pub use attributes::{AttributeValue, Attachment, Attributes, Embed, EmbedField};
pub use context::{ChannelId, Context, ContextRef, StaticContext};
pub use error::{BoxError, ConfigError, DispatchError, HeraldError, ListenerError, panic_message};
pub use event::Event;
pub use listener::{DynListener, HandleFuture, Listener};
pub use path::TopicPath;
pub use sink::ErrorSink;
