#![allow(dead_code)]

use herald::{ChannelId, ContextRef, DispatchConfig, StaticContext};
use std::{num::NonZeroUsize, time::Duration};

// ============================================================================
// Fixtures
// ============================================================================

pub const MOD_LOG: ChannelId = ChannelId(100);
pub const OTHER_CHANNEL: ChannelId = ChannelId(200);

/// A guild containing the moderation log channel.
pub fn home_guild() -> ContextRef {
    StaticContext::new(1, "programming")
        .with_channel(MOD_LOG)
        .with_channel(ChannelId(101))
        .shared()
}

/// A guild the moderation log channel does not belong to.
pub fn other_guild() -> ContextRef {
    StaticContext::new(2, "elsewhere")
        .with_channel(OTHER_CHANNEL)
        .shared()
}

/// The throttle used throughout the tests: 5 per step, 1s per step, 10s cap.
pub fn throttle() -> DispatchConfig {
    DispatchConfig::new(
        NonZeroUsize::new(5).unwrap(),
        Duration::from_secs(1),
        Duration::from_secs(10),
    )
}

/// Install a test log subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
