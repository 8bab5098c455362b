//! A listener that posts journal events to a chat channel.
//!
//! The listener never calls the chat client inline. It builds the message,
//! wraps the client call in an action and pushes it onto the dispatch
//! queue, so that many listeners on many topics share one serialized,
//! throttled outbound path.

use crate::dispatch::DispatchHandle;
use async_trait::async_trait;
use herald_core::{Attachment, BoxError, ChannelId, Embed, Event, Listener, TopicPath};
use std::sync::Arc;
use tracing::debug;

/// A chat channel that messages can be posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Platform id.
    pub id: ChannelId,
    /// Display name, for logs.
    pub name: String,
}

impl Channel {
    /// Describe a channel.
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The payload of one outbound message.
///
/// Only the parts present on the originating event are set; nothing is
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Message text.
    pub content: String,
    /// Rich embed.
    pub embed: Option<Embed>,
    /// A single file.
    pub file: Option<Attachment>,
    /// Several files.
    pub files: Option<Vec<Attachment>>,
}

/// The chat-platform client seam.
///
/// Implemented by the real client; each call performs one network request
/// and may fail.
#[async_trait]
pub trait Outbound: Send + Sync + 'static {
    /// Post `message` to `channel`.
    async fn send_message(&self, channel: &Channel, message: OutboundMessage) -> Result<(), BoxError>;
}

/// Posts every accepted event to one channel via the dispatch queue.
pub struct ChannelOutputListener {
    path: TopicPath,
    recursive: bool,
    channel: Channel,
    outbound: Arc<dyn Outbound>,
    queue: DispatchHandle,
}

impl ChannelOutputListener {
    /// Create a recursive listener on `path` posting to `channel`.
    pub fn new(
        path: impl Into<TopicPath>,
        channel: Channel,
        outbound: Arc<dyn Outbound>,
        queue: DispatchHandle,
    ) -> Self {
        Self {
            path: path.into(),
            recursive: true,
            channel,
            outbound,
            queue,
        }
    }

    /// Only accept events at exactly the bound path.
    pub fn exact(mut self) -> Self {
        self.recursive = false;
        self
    }

    /// The channel messages are posted to.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Build the message for `event`.
    ///
    /// Attachments are cloned, giving the message its own readers.
    pub fn build_message(&self, event: &Event) -> OutboundMessage {
        let attributes = &event.attributes;
        OutboundMessage {
            content: event.content.clone(),
            embed: attributes.embed.clone(),
            file: attributes.file.clone(),
            files: attributes.files.clone(),
        }
    }
}

impl Listener for ChannelOutputListener {
    fn path(&self) -> &TopicPath {
        &self.path
    }

    fn recursive(&self) -> bool {
        self.recursive
    }

    fn name(&self) -> &str {
        "channel-output"
    }

    fn filter(&self, event: &Event) -> bool {
        let Some(context) = &event.context else {
            debug!(path = %event.path, "skipping event, no context attached");
            return false;
        };

        if !context.has_channel(self.channel.id) {
            debug!(
                path = %event.path,
                channel = %self.channel.name,
                channel_id = %self.channel.id,
                context = context.name(),
                context_id = context.id(),
                "skipping event, channel not in this context"
            );
            return false;
        }

        true
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError> {
        let message = self.build_message(event);
        let outbound = Arc::clone(&self.outbound);
        let channel = self.channel.clone();
        self.queue
            .push_fn(async move { outbound.send_message(&channel, message).await })?;
        Ok(())
    }
}
