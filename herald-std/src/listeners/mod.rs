//! Standard listener implementations.

pub mod channel_output;
pub mod tracing;

pub use self::tracing::TracingListener;
pub use channel_output::{Channel, ChannelOutputListener, Outbound, OutboundMessage};
