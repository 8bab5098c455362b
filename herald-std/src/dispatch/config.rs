//! # Dispatch queue configuration.
//!
//! Three knobs shape the throttle:
//!
//! - `bracket_size`: how many pending actions make up one step
//! - `rate`: delay added per step
//! - `max_delay`: upper bound on the delay
//!
//! The delay between two dispatched actions is
//! `min(floor(depth / bracket_size) * rate, max_delay)`. It is a step
//! function: with `bracket_size = 5` the delay stays at zero for depths 0-4
//! and jumps by `rate` at 5, 10, 15 and so on.
//!
//! ## File format
//! With the `config` feature, a config can be read from TOML. Durations are
//! given in seconds and may be fractional:
//! ```toml
//! bracket_size = 5
//! rate = 1.0
//! max_delay = 10.0
//! ```

use std::{num::NonZeroUsize, time::Duration};

/// Throttle settings for a [`DispatchQueue`](super::DispatchQueue).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct DispatchConfig {
    /// Number of pending actions per throttle step. Never zero.
    pub bracket_size: NonZeroUsize,

    /// Delay added for each full bracket of pending actions.
    #[cfg_attr(feature = "config", serde(with = "seconds"))]
    pub rate: Duration,

    /// Upper bound on the delay between two actions.
    #[cfg_attr(feature = "config", serde(with = "seconds"))]
    pub max_delay: Duration,
}

impl DispatchConfig {
    /// Create a config from its three parameters.
    pub const fn new(bracket_size: NonZeroUsize, rate: Duration, max_delay: Duration) -> Self {
        Self {
            bracket_size,
            rate,
            max_delay,
        }
    }

    /// Set the bracket size.
    pub fn with_bracket_size(mut self, bracket_size: NonZeroUsize) -> Self {
        self.bracket_size = bracket_size;
        self
    }

    /// Set the per-bracket rate.
    pub fn with_rate(mut self, rate: Duration) -> Self {
        self.rate = rate;
        self
    }

    /// Set the delay cap.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// The delay to sleep after an action when `depth` actions are pending.
    pub fn delay_for_depth(&self, depth: usize) -> Duration {
        let steps = depth / self.bracket_size.get();
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.rate.saturating_mul(steps).min(self.max_delay)
    }
}

impl Default for DispatchConfig {
    /// Default configuration:
    ///
    /// - `bracket_size = 5`
    /// - `rate = 1s`
    /// - `max_delay = 10s`
    fn default() -> Self {
        Self {
            bracket_size: NonZeroUsize::new(5).unwrap_or(NonZeroUsize::MIN),
            rate: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

#[cfg(feature = "config")]
impl DispatchConfig {
    /// Parse a config from TOML. Missing keys take their default value.
    pub fn from_toml_str(source: &str) -> Result<Self, herald_core::ConfigError> {
        toml::from_str(source).map_err(|e| herald_core::ConfigError::Parse(Box::new(e)))
    }
}

/// Durations as fractional seconds.
#[cfg(feature = "config")]
mod seconds {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| D::Error::custom(format!("`{secs}` is not a valid number of seconds")))
    }
}
