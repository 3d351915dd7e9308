//! Cache Entry Module
//!
//! Defines a cached tracking result and the freshness rule applied to it.

use std::time::Duration;

use serde_json::Value;

/// Milliseconds in one hour.
pub const HOUR_MS: u64 = 60 * 60 * 1000;

// == Cache Entry ==
/// A tracking payload together with the time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Upstream response body, stored as-is
    pub payload: Value,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with `stored_at`.
    pub fn new(payload: Value, stored_at: u64) -> Self {
        Self { payload, stored_at }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was written.
    ///
    /// A `now` earlier than `stored_at` reads as zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    /// Whole hours elapsed since the entry was written, rounded down.
    pub fn age_hours(&self, now_ms: u64) -> u64 {
        self.age_ms(now_ms) / HOUR_MS
    }
}

// == Freshness ==
/// Returns true while `now - stored_at < ttl`.
///
/// Expiry is measured from write time only. At exactly `ttl` the entry is
/// already stale.
pub fn is_fresh(entry: &CacheEntry, now_ms: u64, ttl: Duration) -> bool {
    u128::from(entry.age_ms(now_ms)) < ttl.as_millis()
}
