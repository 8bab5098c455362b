//! Failure reporting.
//!
//! Neither the router nor the dispatch queue lets a failure stop them: a
//! listener that errors does not keep the next listener from running, and
//! an action that errors does not end the consumer loop. The failure still
//! has to go somewhere, and that somewhere is an [`ErrorSink`] injected at
//! construction.

use crate::error::HeraldError;

/// Receives failures that the router or dispatch queue isolated.
///
/// Implemented for any `Fn(HeraldError)` closure.
pub trait ErrorSink: Send + Sync + 'static {
    /// Report one failure. Must not block.
    fn report(&self, error: HeraldError);
}

impl<F> ErrorSink for F
where
    F: Fn(HeraldError) + Send + Sync + 'static,
{
    fn report(&self, error: HeraldError) {
        self(error)
    }
}
