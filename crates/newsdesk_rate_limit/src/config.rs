//! Serializable retry and pacing settings.

use crate::{PacingPolicy, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;

/// Retry settings as they appear in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Wait before the first retry, in milliseconds
    pub initial_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 5000,
        }
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.initial_delay_ms),
        )
    }
}

/// Pacing settings as they appear in configuration files.
///
/// Setting `requests_per_minute` selects a quota and overrides the fixed
/// interval. A zero interval with no quota disables pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Minimum gap between image calls, in milliseconds
    pub min_interval_ms: u64,
    /// Optional per-minute quota
    pub requests_per_minute: Option<u32>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 15_000,
            requests_per_minute: None,
        }
    }
}

impl From<PacingConfig> for PacingPolicy {
    fn from(config: PacingConfig) -> Self {
        if let Some(rpm) = config.requests_per_minute.and_then(NonZeroU32::new) {
            return PacingPolicy::PerMinute(rpm);
        }
        match config.min_interval_ms {
            0 => PacingPolicy::Unpaced,
            ms => PacingPolicy::FixedInterval(Duration::from_millis(ms)),
        }
    }
}
