//! Outbound dispatch.
//!
//! The single serialized, adaptively throttled queue that every outbound
//! side effect is funnelled through.

pub mod config;
pub mod queue;

pub use config::DispatchConfig;
pub use queue::{Action, DispatchHandle, DispatchQueue, DispatchWorker};
