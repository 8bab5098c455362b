//! Journal events.

use crate::{attributes::Attributes, context::ContextRef, path::TopicPath};

/// A single journal event.
///
/// Events are ephemeral: the router hands the same event to every matching
/// listener and drops it once `publish` returns. Nothing is stored or retried.
#[derive(Debug, Clone)]
pub struct Event {
    /// Where the event was published.
    pub path: TopicPath,
    /// The guild (or other grouping) the event concerns, if any.
    pub context: Option<ContextRef>,
    /// Human-readable text.
    pub content: String,
    /// Rich payload.
    pub attributes: Attributes,
}

impl Event {
    /// Assemble an event.
    pub fn new(
        path: impl Into<TopicPath>,
        context: Option<ContextRef>,
        content: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            path: path.into(),
            context,
            content: content.into(),
            attributes,
        }
    }

    /// The id of the attached context, for log fields.
    pub fn context_id(&self) -> Option<u64> {
        self.context.as_ref().map(|context| context.id())
    }
}
