//! Error types for herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HeraldError`] - Top-level error type, as handed to an [`ErrorSink`]
//! - [`ListenerError`] - A listener's filter or handle failed
//! - [`DispatchError`] - A dispatched action failed, or the queue is gone
//! - [`ConfigError`] - Invalid dispatch configuration
//!
//! [`ErrorSink`]: crate::ErrorSink

use crate::path::TopicPath;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// A listener failed while the router delivered an event.
    #[error("listener error: {0}")]
    Listener(#[from] ListenerError),

    /// The dispatch queue failed to run or accept an action.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// The dispatch configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Failures isolated by the router while delivering one event.
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The filter panicked.
    #[error("listener `{listener}` panicked in filter for {path}: {message}")]
    FilterPanicked {
        /// Listener name.
        listener: String,
        /// Path of the event being filtered.
        path: TopicPath,
        /// Panic payload.
        message: String,
    },

    /// The handle returned an error.
    #[error("listener `{listener}` failed to handle {path}")]
    HandleFailed {
        /// Listener name.
        listener: String,
        /// Path of the event being handled.
        path: TopicPath,
        /// The listener's error.
        #[source]
        source: BoxError,
    },

    /// The handle panicked.
    #[error("listener `{listener}` panicked while handling {path}: {message}")]
    HandlePanicked {
        /// Listener name.
        listener: String,
        /// Path of the event being handled.
        path: TopicPath,
        /// Panic payload.
        message: String,
    },
}

impl ListenerError {
    /// Name of the listener that failed.
    pub fn listener(&self) -> &str {
        match self {
            ListenerError::FilterPanicked { listener, .. }
            | ListenerError::HandleFailed { listener, .. }
            | ListenerError::HandlePanicked { listener, .. } => listener,
        }
    }

    /// Path of the event that was being delivered.
    pub fn path(&self) -> &TopicPath {
        match self {
            ListenerError::FilterPanicked { path, .. }
            | ListenerError::HandleFailed { path, .. }
            | ListenerError::HandlePanicked { path, .. } => path,
        }
    }
}

/// Errors raised around the dispatch queue.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A dequeued action returned an error.
    #[error("dispatched action failed")]
    ActionFailed(#[source] BoxError),

    /// A dequeued action panicked.
    #[error("dispatched action panicked: {0}")]
    ActionPanicked(String),

    /// The consumer is gone; nothing will run pushed actions any more.
    #[error("dispatch queue has been shut down")]
    Closed,
}

/// Errors in dispatch configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration source could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] BoxError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// Convenience conversions
impl From<BoxError> for HeraldError {
    fn from(err: BoxError) -> Self {
        HeraldError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::ActionFailed(err)
    }
}

/// Render a caught panic payload as text.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
