//! The journal router.
//!
//! One [`Router`] per process owns every registered listener. Publishing an
//! event walks the listeners in registration order:
//!
//! ```text
//! publish(event)
//!     │
//!     ├─► listener 1: matches(path)? ─► filter(event)? ─► handle(event).await
//!     ├─► listener 2: matches(path)? ─► filter(event)? ─► handle(event).await
//!     └─► listener N: ...
//! ```
//!
//! A listener matches when its path equals the event path or, for recursive
//! listeners, is a hierarchical prefix of it.
//!
//! # Failure isolation
//!
//! A filter panic, a handle error or a handle panic is caught, reported to
//! the router's [`ErrorSink`] and counted in the returned [`Delivery`]; the
//! remaining listeners still run.
//!
//! # Ordering
//!
//! `publish` awaits each accepted `handle` before moving to the next
//! listener and returns only after all of them completed, so one publisher's
//! events reach a given listener in publish order.

use super::broadcaster::Broadcaster;
use crate::sinks::TracingSink;
use futures::FutureExt;
use herald_core::{
    DynListener, ErrorSink, Event, Listener, ListenerError, TopicPath, panic_message,
};
use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, PoisonError, RwLock},
};
use tracing::trace;

/// Outcome of one [`Router::publish`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    /// Listeners whose path matched the event.
    pub matched: usize,
    /// Listeners whose filter accepted the event.
    pub accepted: usize,
    /// Accepted listeners whose handle completed without error.
    pub handled: usize,
    /// Listeners that panicked in `filter` or failed in `handle`.
    pub failed: usize,
}

/// Process-wide registry of listeners.
pub struct Router {
    listeners: RwLock<Vec<Arc<dyn DynListener>>>,
    sink: Arc<dyn ErrorSink>,
}

impl Router {
    /// Create a router that logs listener failures via `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create a router that reports listener failures to `sink`.
    pub fn with_sink(sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            sink,
        }
    }

    /// Register a listener. Several listeners may share a path.
    pub fn register<L: Listener>(&self, listener: L) {
        self.register_arc(Arc::new(listener));
    }

    /// Register an already shared listener.
    pub fn register_arc(&self, listener: Arc<dyn DynListener>) {
        trace!(
            listener = listener.name(),
            path = %listener.path(),
            recursive = listener.recursive(),
            "registering listener"
        );
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A broadcaster bound to `path` on this router.
    pub fn broadcaster(self: &Arc<Self>, path: impl Into<TopicPath>) -> Broadcaster {
        Broadcaster::new(Arc::clone(self), path)
    }

    /// Deliver `event` to every matching listener.
    pub async fn publish(&self, event: Event) -> Delivery {
        // Snapshot so handles may register or publish without deadlocking.
        let listeners: Vec<Arc<dyn DynListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut delivery = Delivery::default();
        for listener in listeners {
            if !listener.matches(&event.path) {
                continue;
            }
            delivery.matched += 1;

            let accepted = match catch_unwind(AssertUnwindSafe(|| listener.filter(&event))) {
                Ok(accepted) => accepted,
                Err(panic) => {
                    delivery.failed += 1;
                    self.sink.report(
                        ListenerError::FilterPanicked {
                            listener: listener.name().to_string(),
                            path: event.path.clone(),
                            message: panic_message(&*panic),
                        }
                        .into(),
                    );
                    continue;
                }
            };
            trace!(listener = listener.name(), path = %event.path, accepted, "filtered event");
            if !accepted {
                continue;
            }
            delivery.accepted += 1;

            let failure = match AssertUnwindSafe(listener.handle_dyn(&event))
                .catch_unwind()
                .await
            {
                Ok(Ok(())) => None,
                Ok(Err(source)) => Some(ListenerError::HandleFailed {
                    listener: listener.name().to_string(),
                    path: event.path.clone(),
                    source,
                }),
                Err(panic) => Some(ListenerError::HandlePanicked {
                    listener: listener.name().to_string(),
                    path: event.path.clone(),
                    message: panic_message(&*panic),
                }),
            };
            match failure {
                Some(failure) => {
                    delivery.failed += 1;
                    self.sink.report(failure.into());
                }
                None => delivery.handled += 1,
            }
        }
        delivery
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("listeners", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{Attributes, BoxError, HeraldError};
    use std::sync::Mutex;

    struct Echo {
        path: TopicPath,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Listener for Echo {
        fn path(&self) -> &TopicPath {
            &self.path
        }

        fn filter(&self, _event: &Event) -> bool {
            true
        }

        async fn handle(&self, event: &Event) -> Result<(), BoxError> {
            self.seen.lock().unwrap().push(event.content.clone());
            Ok(())
        }
    }

    struct Registers {
        path: TopicPath,
        router: Arc<Router>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Listener for Registers {
        fn path(&self) -> &TopicPath {
            &self.path
        }

        fn filter(&self, _event: &Event) -> bool {
            true
        }

        async fn handle(&self, _event: &Event) -> Result<(), BoxError> {
            self.router.register(Echo {
                path: TopicPath::root(),
                seen: self.seen.clone(),
            });
            Ok(())
        }
    }

    fn event(path: &str, content: &str) -> Event {
        Event::new(path, None, content, Attributes::new())
    }

    #[tokio::test]
    async fn test_publish_without_listeners() {
        let router = Router::new();
        assert!(router.is_empty());
        let delivery = router.publish(event("/debug", "nobody home")).await;
        assert_eq!(delivery, Delivery::default());
    }

    #[tokio::test]
    async fn test_handle_may_register_during_publish() {
        let router = Arc::new(Router::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        router.register(Registers {
            path: TopicPath::root(),
            router: router.clone(),
            seen: seen.clone(),
        });

        let first = router.publish(event("/debug", "first")).await;
        assert_eq!(first.accepted, 1);
        assert_eq!(router.len(), 2);
        assert!(seen.lock().unwrap().is_empty());

        router.publish(event("/debug", "second")).await;
        assert_eq!(*seen.lock().unwrap(), vec!["second".to_string()]);
    }

    #[tokio::test]
    async fn test_failures_reach_sink() {
        struct Refuses(TopicPath);

        impl Listener for Refuses {
            fn path(&self) -> &TopicPath {
                &self.0
            }

            fn filter(&self, _event: &Event) -> bool {
                true
            }

            async fn handle(&self, _event: &Event) -> Result<(), BoxError> {
                Err("channel gone".into())
            }
        }

        let reports = Arc::new(Mutex::new(Vec::new()));
        let captured = reports.clone();
        let router = Router::with_sink(Arc::new(move |error: HeraldError| {
            captured.lock().unwrap().push(error)
        }));
        router.register(Refuses(TopicPath::new("/error")));

        let delivery = router.publish(event("/error/network", "timeout")).await;
        assert_eq!(delivery.failed, 1);
        assert_eq!(delivery.handled, 0);

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        match &reports[0] {
            HeraldError::Listener(failure) => {
                assert!(failure.listener().ends_with("Refuses"));
                assert_eq!(failure.path(), &TopicPath::new("/error/network"));
            }
            other => panic!("unexpected report: {other}"),
        }
    }
}
