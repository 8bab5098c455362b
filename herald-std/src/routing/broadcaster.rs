//! Per-subsystem publishing handle.

use super::router::Router;
use herald_core::{Attributes, ContextRef, Event, TopicPath};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A handle bound to one topic path.
///
/// Subsystems hold a broadcaster instead of the router and publish below
/// their own path:
///
/// ```rust,ignore
/// let journal = router.broadcaster("/debug");
/// journal
///     .send("error/runtime", ctx, "Raising runtime error", Attributes::new().with("icon", "error"))
///     .await;
/// // published at /debug/error/runtime
/// ```
#[derive(Clone, Debug)]
pub struct Broadcaster {
    router: Arc<Router>,
    path: TopicPath,
}

impl Broadcaster {
    /// Bind a broadcaster to `path` on `router`.
    pub fn new(router: Arc<Router>, path: impl Into<TopicPath>) -> Self {
        Self {
            router,
            path: path.into(),
        }
    }

    /// The bound path.
    pub fn path(&self) -> &TopicPath {
        &self.path
    }

    /// Publish at `subpath` below the bound path.
    ///
    /// Returns once every matching listener's `handle` has completed.
    /// Listener failures go to the router's error sink, not to the caller.
    pub async fn send(
        &self,
        subpath: &str,
        context: Option<ContextRef>,
        content: impl Into<String>,
        attributes: Attributes,
    ) {
        let event = self.event(subpath, context, content, attributes);
        self.router.publish(event).await;
    }

    /// Publish on a spawned task and return immediately.
    ///
    /// For synchronous call sites. Requires a tokio runtime.
    pub fn spawn_send(
        &self,
        subpath: &str,
        context: Option<ContextRef>,
        content: impl Into<String>,
        attributes: Attributes,
    ) -> JoinHandle<()> {
        let event = self.event(subpath, context, content, attributes);
        let router = Arc::clone(&self.router);
        tokio::spawn(async move {
            router.publish(event).await;
        })
    }

    fn event(
        &self,
        subpath: &str,
        context: Option<ContextRef>,
        content: impl Into<String>,
        attributes: Attributes,
    ) -> Event {
        Event::new(self.path.join(subpath), context, content, attributes)
    }
}
