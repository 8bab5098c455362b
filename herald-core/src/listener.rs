//! # Subscriber Layer (Listener)
//!
//! A Listener is a subscriber bound to a topic path. The router offers it
//! every event published at that path (and, when the listener is recursive,
//! at every path below it). The listener then decides in two steps:
//!
//! 1. **Gatekeeping** ([`Listener::filter`]): a pure predicate that accepts or
//!    rejects this particular event, e.g. because it lacks a context.
//! 2. **Action** ([`Listener::handle`]): the side effect, run only for
//!    events the filter accepted.
//!
//! # Side Effects
//!
//! A listener that talks to the outside world should not do so inline.
//! Outbound calls belong on the dispatch queue, which serializes and
//! throttles them; `handle` only builds the call and pushes it.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Listener`] uses native `async fn` for zero-cost static dispatch. The
//! router stores listeners as [`DynListener`] trait objects, which every
//! `Listener` implements automatically.

use crate::{error::BoxError, event::Event, path::TopicPath};
use std::{future::Future, pin::Pin};

/// A subscriber to a topic path.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a journal `Listener`",
    label = "missing `Listener` implementation",
    note = "Listeners must provide `path`, `filter` and `handle`."
)]
pub trait Listener: Send + Sync + 'static {
    /// The topic path this listener is bound to.
    fn path(&self) -> &TopicPath;

    /// Whether events below [`path`](Listener::path) are delivered too.
    fn recursive(&self) -> bool {
        true
    }

    /// Name used in logs and failure reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Decide whether this listener cares about `event`.
    ///
    /// Must not mutate external state.
    fn filter(&self, event: &Event) -> bool;

    /// Act on an accepted event.
    ///
    /// Only called after [`filter`](Listener::filter) returned `true` for
    /// the same event. Errors are reported by the router, never swallowed.
    fn handle(&self, event: &Event) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Boxed future returned by [`DynListener::handle_dyn`].
pub type HandleFuture<'a> = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;

/// Object-safe version of [`Listener`].
///
/// Use this trait when you need runtime polymorphism, e.g. in a registry.
pub trait DynListener: Send + Sync + 'static {
    /// See [`Listener::path`].
    fn path(&self) -> &TopicPath;

    /// See [`Listener::recursive`].
    fn recursive(&self) -> bool;

    /// See [`Listener::name`].
    fn name(&self) -> &str;

    /// See [`Listener::filter`].
    fn filter(&self, event: &Event) -> bool;

    /// See [`Listener::handle`] (dynamic dispatch version).
    fn handle_dyn<'a>(&'a self, event: &'a Event) -> HandleFuture<'a>;

    /// Whether an event published at `path` reaches this listener's filter.
    fn matches(&self, path: &TopicPath) -> bool {
        if self.recursive() {
            self.path().is_prefix_of(path)
        } else {
            self.path() == path
        }
    }
}

// Blanket implementation: any Listener is a DynListener.
impl<L: Listener> DynListener for L {
    fn path(&self) -> &TopicPath {
        Listener::path(self)
    }

    fn recursive(&self) -> bool {
        Listener::recursive(self)
    }

    fn name(&self) -> &str {
        Listener::name(self)
    }

    fn filter(&self, event: &Event) -> bool {
        Listener::filter(self, event)
    }

    fn handle_dyn<'a>(&'a self, event: &'a Event) -> HandleFuture<'a> {
        Box::pin(self.handle(event))
    }
}
