//! # Process-scoped journal context.
//!
//! A [`Journal`] is built once at startup and handed (cloned) to every
//! subsystem that publishes events or enqueues outbound actions. It bundles:
//!
//! - the [`Router`] with its listeners,
//! - the producer side of the [`DispatchQueue`], whose single consumer is
//!   spawned on construction.
//!
//! ```rust,ignore
//! let journal = Journal::start(DispatchConfig::default());
//! journal.register(ChannelOutputListener::new("/moderation", channel, client, journal.queue().clone()));
//!
//! let moderation = journal.broadcaster("/moderation");
//! moderation.send("ban", Some(guild), "Banned user", Attributes::new()).await;
//! ```

use crate::{
    dispatch::{DispatchConfig, DispatchHandle, DispatchQueue},
    routing::{Broadcaster, Router},
    sinks::TracingSink,
};
use herald_core::{ErrorSink, Listener, TopicPath};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The router and dispatch queue of one process.
#[derive(Clone, Debug)]
pub struct Journal {
    router: Arc<Router>,
    queue: DispatchHandle,
    worker: Arc<JoinHandle<()>>,
}

impl Journal {
    /// Build the journal and spawn the dispatch consumer, logging failures
    /// via `tracing`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: DispatchConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Build the journal with a custom error sink shared by the router and
    /// the dispatch consumer.
    pub fn with_sink(config: DispatchConfig, sink: Arc<dyn ErrorSink>) -> Self {
        let router = Arc::new(Router::with_sink(Arc::clone(&sink)));
        let (queue, worker) = DispatchQueue::new(config, sink);
        tracing::debug!(
            bracket_size = config.bracket_size.get(),
            rate_secs = config.rate.as_secs_f64(),
            max_delay_secs = config.max_delay.as_secs_f64(),
            "starting dispatch worker"
        );
        Self {
            router,
            queue,
            worker: Arc::new(worker.start()),
        }
    }

    /// The listener registry.
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// The outbound dispatch queue.
    pub fn queue(&self) -> &DispatchHandle {
        &self.queue
    }

    /// A broadcaster bound to `path`.
    pub fn broadcaster(&self, path: impl Into<TopicPath>) -> Broadcaster {
        self.router.broadcaster(path)
    }

    /// Register a listener on the router.
    pub fn register<L: Listener>(&self, listener: L) {
        self.router.register(listener);
    }

    /// Whether the dispatch consumer is still running.
    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }
}
