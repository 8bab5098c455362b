//! Standard error sinks.

use herald_core::{ErrorSink, HeraldError};
use std::error::Error as _;

/// Logs every reported failure at `error` level.
///
/// The default sink for [`Router`](crate::routing::Router) and the
/// [`Journal`](crate::journal::Journal).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, error: HeraldError) {
        match &error {
            HeraldError::Listener(failure) => tracing::error!(
                listener = %failure.listener(),
                path = %failure.path(),
                cause = ?failure.source(),
                "{error}"
            ),
            _ => tracing::error!(cause = ?error.source(), "{error}"),
        }
    }
}

/// Discards every failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSink;

impl ErrorSink for IgnoreSink {
    fn report(&self, _error: HeraldError) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{DispatchError, ListenerError, TopicPath};

    #[test]
    fn test_tracing_sink_accepts_every_kind() {
        let sink = TracingSink;
        sink.report(
            ListenerError::HandlePanicked {
                listener: "audit".to_string(),
                path: TopicPath::new("/error"),
                message: "boom".to_string(),
            }
            .into(),
        );
        sink.report(DispatchError::Closed.into());
        IgnoreSink.report(DispatchError::Closed.into());
    }
}
