//! Testing utilities for herald.
//!
//! This module provides utilities to make testing listeners, the router and
//! the dispatch queue easier.
//!
//! # Features
//!
//! - [`RecordingListener`]: A listener that records what reached its filter and handle
//! - [`RecordingOutbound`]: A chat client that records messages instead of sending them
//! - [`CollectingSink`]: An error sink that keeps every reported failure

use crate::listeners::{Channel, Outbound, OutboundMessage};
use async_trait::async_trait;
use herald_core::{BoxError, ErrorSink, Event, HeraldError, Listener, TopicPath};
use std::sync::{Arc, Mutex, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Recording Listener
// ============================================================================

/// What a [`RecordingListener`] should do when called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    /// Accept every event and handle it successfully.
    #[default]
    Accept,
    /// Reject every event in the filter.
    Reject,
    /// Accept, then return an error from handle.
    FailHandle,
    /// Accept, then panic in handle.
    PanicHandle,
    /// Panic in the filter.
    PanicFilter,
}

/// A listener that records the events reaching its filter and its handle.
///
/// Clones share their records.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new("/error");
/// router.register(recorder.clone());
///
/// router.publish(event).await;
///
/// assert_eq!(recorder.handled().len(), 1);
/// ```
#[derive(Clone)]
pub struct RecordingListener {
    path: TopicPath,
    recursive: bool,
    name: String,
    behavior: Behavior,
    filtered: Arc<Mutex<Vec<Event>>>,
    handled: Arc<Mutex<Vec<Event>>>,
}

impl RecordingListener {
    /// A recursive listener on `path` that accepts everything.
    pub fn new(path: impl Into<TopicPath>) -> Self {
        let path = path.into();
        Self {
            name: format!("recorder:{path}"),
            path,
            recursive: true,
            behavior: Behavior::Accept,
            filtered: Arc::new(Mutex::new(Vec::new())),
            handled: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Only match events at exactly the bound path.
    pub fn exact(mut self) -> Self {
        self.recursive = false;
        self
    }

    /// Set the listener's behavior.
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set the name used in failure reports.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Events that reached the filter.
    pub fn filtered(&self) -> Vec<Event> {
        lock(&self.filtered).clone()
    }

    /// Events that reached handle.
    pub fn handled(&self) -> Vec<Event> {
        lock(&self.handled).clone()
    }

    /// Paths of the events that reached handle, in order.
    pub fn handled_paths(&self) -> Vec<String> {
        lock(&self.handled)
            .iter()
            .map(|event| event.path.to_string())
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        lock(&self.filtered).clear();
        lock(&self.handled).clear();
    }
}

impl Listener for RecordingListener {
    fn path(&self) -> &TopicPath {
        &self.path
    }

    fn recursive(&self) -> bool {
        self.recursive
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn filter(&self, event: &Event) -> bool {
        lock(&self.filtered).push(event.clone());
        match self.behavior {
            Behavior::Reject => false,
            Behavior::PanicFilter => panic!("{} refused to filter", self.name),
            _ => true,
        }
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError> {
        lock(&self.handled).push(event.clone());
        match self.behavior {
            Behavior::FailHandle => Err(format!("{} failed on purpose", self.name).into()),
            Behavior::PanicHandle => panic!("{} panicked on purpose", self.name),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Recording Outbound
// ============================================================================

/// A chat client that records every message it is asked to send.
///
/// Clones share their records.
#[derive(Clone, Default)]
pub struct RecordingOutbound {
    sent: Arc<Mutex<Vec<(Channel, OutboundMessage)>>>,
    fail_next: Arc<Mutex<usize>>,
}

impl RecordingOutbound {
    /// Create a client that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` sends fail without recording.
    pub fn fail_next(&self, count: usize) {
        *lock(&self.fail_next) = count;
    }

    /// Messages sent so far, in order.
    pub fn sent(&self) -> Vec<(Channel, OutboundMessage)> {
        lock(&self.sent).clone()
    }

    /// Number of messages sent so far.
    pub fn count(&self) -> usize {
        lock(&self.sent).len()
    }
}

#[async_trait]
impl Outbound for RecordingOutbound {
    async fn send_message(&self, channel: &Channel, message: OutboundMessage) -> Result<(), BoxError> {
        {
            let mut failures = lock(&self.fail_next);
            if *failures > 0 {
                *failures -= 1;
                return Err(format!("refusing to post to {}", channel.name).into());
            }
        }
        lock(&self.sent).push((channel.clone(), message));
        Ok(())
    }
}

// ============================================================================
// Collecting Sink
// ============================================================================

/// An error sink that keeps the text of every reported failure.
#[derive(Clone, Default)]
pub struct CollectingSink {
    reports: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported failures, rendered with `Display`.
    pub fn reports(&self) -> Vec<String> {
        lock(&self.reports).clone()
    }

    /// Number of reported failures.
    pub fn count(&self) -> usize {
        lock(&self.reports).len()
    }

    /// Share the sink, keeping this handle for inspection.
    pub fn shared(&self) -> Arc<dyn ErrorSink> {
        Arc::new(self.clone())
    }
}

impl ErrorSink for CollectingSink {
    fn report(&self, error: HeraldError) {
        lock(&self.reports).push(error.to_string());
    }
}
