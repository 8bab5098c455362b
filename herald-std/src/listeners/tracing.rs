//! Logging listener for journal observation.

use herald_core::{BoxError, Event, Listener, TopicPath};
use tracing::Level;

/// A listener that writes every event it receives to the `tracing` log.
///
/// Accepts all events; useful for mirroring a subtree of the journal
/// (e.g. `/error`) into the process log.
pub struct TracingListener {
    path: TopicPath,
    recursive: bool,
    level: Level,
}

impl TracingListener {
    /// Log everything at or below `path` at `INFO`.
    pub fn new(path: impl Into<TopicPath>) -> Self {
        Self {
            path: path.into(),
            recursive: true,
            level: Level::INFO,
        }
    }

    /// Set the log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Only log events at exactly the bound path.
    pub fn exact(mut self) -> Self {
        self.recursive = false;
        self
    }
}

impl Listener for TracingListener {
    fn path(&self) -> &TopicPath {
        &self.path
    }

    fn recursive(&self) -> bool {
        self.recursive
    }

    fn name(&self) -> &str {
        "tracing"
    }

    fn filter(&self, _event: &Event) -> bool {
        true
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError> {
        let path = event.path.as_str();
        let context = event.context_id();
        let content = event.content.as_str();
        // `tracing` macros need the level as a constant.
        match self.level {
            Level::ERROR => tracing::error!(path, ?context, "{content}"),
            Level::WARN => tracing::warn!(path, ?context, "{content}"),
            Level::INFO => tracing::info!(path, ?context, "{content}"),
            Level::DEBUG => tracing::debug!(path, ?context, "{content}"),
            _ => tracing::trace!(path, ?context, "{content}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::Attributes;

    #[tokio::test]
    async fn test_tracing_listener_accepts_everything() {
        let listener = TracingListener::new("/error").with_level(Level::WARN);
        let event = Event::new("/error/network", None, "connection reset", Attributes::new());
        assert!(listener.filter(&event));
        assert!(listener.handle(&event).await.is_ok());
        assert!(listener.recursive());
        assert!(!TracingListener::new("/error").exact().recursive());
    }
}
