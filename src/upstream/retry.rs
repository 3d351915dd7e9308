//! Retry Policy
//!
//! Bounded exponential backoff for transient upstream failures.

use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

/// Cap on any single backoff delay.
const MAX_DELAY: Duration = Duration::from_secs(5);

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: MAX_DELAY.max(base_delay),
        }
    }

    /// Policy that gives up after the first failure.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }

    /// Delay before retry number `attempt` (zero-based): `base * 2^attempt`, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_millis() as u64;
        let cap = self.max_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(base.saturating_mul(factor).min(cap))
    }

    /// Returns the wait before retrying, or `None` when the error should be
    /// returned as-is.
    pub fn should_retry(&self, attempt: u32, error: &UpstreamError) -> Option<Duration> {
        if attempt >= self.max_retries || !error.is_transient() {
            return None;
        }
        Some(self.backoff(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&UpstreamConfig::default())
    }
}
