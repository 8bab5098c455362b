//! # herald-std
//!
//! Standard implementations for the herald journal.
//!
//! This crate provides:
//! - **Routing**: [`Router`](routing::Router), [`Broadcaster`](routing::Broadcaster)
//! - **Dispatch**: the throttled outbound [`DispatchQueue`](dispatch::DispatchQueue)
//! - **Standard listeners**: channel output, tracing
//! - **Sinks**: [`TracingSink`](sinks::TracingSink), [`IgnoreSink`](sinks::IgnoreSink)
//! - **Process context**: [`Journal`](journal::Journal)
//! - **Testing utilities**: recording listener, client and sink

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use herald_core;

// Re-exported for `Outbound` implementors
pub use async_trait::async_trait;

// Modules
pub mod dispatch;
pub mod journal;
pub mod listeners;
pub mod routing;
pub mod sinks;
pub mod testing;
