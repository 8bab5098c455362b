//! # Serialized, adaptively throttled outbound actions.
//!
//! Every side effect that reaches the chat platform goes through one queue
//! with exactly one consumer. Producers push deferred actions; the consumer
//! runs them one at a time and sleeps between them for a delay that grows
//! with the backlog.
//!
//! ## Architecture
//! ```text
//! listener.handle() ─┐
//! listener.handle() ─┼─► push(action) ─► [unbounded FIFO] ─► DispatchWorker
//! listener.handle() ─┘   (sync, never blocks)                     │
//!                                                                 ▼
//!                               WAIT ──► EXECUTE ──► THROTTLE ──► WAIT
//!                                          │
//!                                          └─ Err / panic ─► ErrorSink
//! ```
//!
//! ## Rules
//! - **Single consumer**: [`DispatchQueue::new`] hands out one
//!   [`DispatchWorker`]; [`DispatchWorker::start`] consumes it, so the loop
//!   cannot be started twice
//! - **FIFO**: actions run in push order
//! - **Non-blocking push**: [`DispatchHandle::push`] is synchronous and may be
//!   called from any task or thread
//! - **Survival**: an action's error or panic is reported to the sink and the
//!   loop moves on to the throttle step and the next action
//! - **No cancellation**: a dequeued action runs to completion
//!
//! The loop only ends once every [`DispatchHandle`] has been dropped, i.e. at
//! process teardown.

use super::config::DispatchConfig;
use futures::{FutureExt, future::BoxFuture};
use herald_core::{BoxError, DispatchError, ErrorSink, panic_message};
use std::{
    future::Future,
    panic::AssertUnwindSafe,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, trace};

/// A deferred outbound call. Futures are lazy, so nothing runs until the
/// consumer polls it.
pub type Action = BoxFuture<'static, Result<(), BoxError>>;

/// State shared by the handles and the worker.
#[derive(Debug)]
struct Shared {
    config: DispatchConfig,
    depth: AtomicUsize,
}

impl Shared {
    fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    fn current_delay(&self) -> Duration {
        self.config.delay_for_depth(self.depth())
    }
}

/// Constructor for the queue's two halves.
pub struct DispatchQueue;

impl DispatchQueue {
    /// Create a queue, returning the producer handle and the consumer.
    ///
    /// The consumer does nothing until [`DispatchWorker::start`] (or
    /// [`DispatchWorker::run`]) is called; pushes made before that are kept.
    #[must_use]
    pub fn new(config: DispatchConfig, sink: Arc<dyn ErrorSink>) -> (DispatchHandle, DispatchWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            config,
            depth: AtomicUsize::new(0),
        });
        let handle = DispatchHandle {
            sender,
            shared: Arc::clone(&shared),
        };
        let worker = DispatchWorker {
            receiver,
            shared,
            sink,
        };
        (handle, worker)
    }
}

/// Producer side of the dispatch queue. Cheap to clone.
#[derive(Clone, Debug)]
pub struct DispatchHandle {
    sender: mpsc::UnboundedSender<Action>,
    shared: Arc<Shared>,
}

impl DispatchHandle {
    /// Enqueue an action.
    ///
    /// Never blocks. Fails only with [`DispatchError::Closed`] when the
    /// worker has been dropped.
    pub fn push(&self, action: Action) -> Result<(), DispatchError> {
        // Count first so the worker never observes a dequeue before its push.
        let depth = self.shared.depth.fetch_add(1, Ordering::SeqCst) + 1;
        if self.sender.send(action).is_err() {
            self.shared.depth.fetch_sub(1, Ordering::SeqCst);
            return Err(DispatchError::Closed);
        }
        trace!(depth, "pushed dispatch action");
        Ok(())
    }

    /// Enqueue any `'static` future resolving to a `Result`.
    pub fn push_fn<F, E>(&self, future: F) -> Result<(), DispatchError>
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError>,
    {
        self.push(Box::pin(async move { future.await.map_err(Into::into) }))
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.shared.depth()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The delay the worker would sleep for at the current depth.
    pub fn current_delay(&self) -> Duration {
        self.shared.current_delay()
    }

    /// The throttle configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.shared.config
    }

    /// Whether the worker is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer side of the dispatch queue. There is exactly one per queue.
pub struct DispatchWorker {
    receiver: mpsc::UnboundedReceiver<Action>,
    shared: Arc<Shared>,
    sink: Arc<dyn ErrorSink>,
}

impl DispatchWorker {
    /// Spawn the consumer loop on the current tokio runtime.
    ///
    /// Consumes the worker: a queue can only ever have one consumer.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the consumer loop on the calling task.
    pub async fn run(mut self) {
        loop {
            debug!("waiting for next dispatch action");
            let Some(action) = self.receiver.recv().await else {
                debug!("all dispatch handles dropped, stopping worker");
                break;
            };
            self.shared.depth.fetch_sub(1, Ordering::SeqCst);

            match AssertUnwindSafe(action).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => self.sink.report(DispatchError::ActionFailed(e).into()),
                Err(panic) => self
                    .sink
                    .report(DispatchError::ActionPanicked(panic_message(&*panic)).into()),
            }

            let delay = self.shared.current_delay();
            if !delay.is_zero() {
                debug!(
                    delay_secs = delay.as_secs_f64(),
                    pending = self.shared.depth(),
                    "sleeping until next dispatch action"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
