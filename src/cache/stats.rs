//! Cache Statistics Module
//!
//! Point-in-time view of what the cache holds and how old each entry is.

use serde::Serialize;

// == Entry Age ==
/// Age report for a single cached key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryAge {
    /// Cache key (`{tracking_number}_{carrier}`)
    pub key: String,
    /// Whole hours since the entry was written, rounded down
    pub age_hours: u64,
    /// Whole hours left before the entry goes stale, zero once it has
    pub remaining_hours: u64,
    /// Whether lookups already treat the entry as stale
    pub expired: bool,
}

impl EntryAge {
    /// Builds an age report, clamping the remaining time at zero.
    ///
    /// Staleness is inferred from whole hours here; callers that know the
    /// exact age override it with [`EntryAge::with_expired`].
    pub fn new(key: impl Into<String>, age_hours: u64, ttl_hours: u64) -> Self {
        Self {
            key: key.into(),
            age_hours,
            remaining_hours: ttl_hours.saturating_sub(age_hours),
            expired: age_hours >= ttl_hours,
        }
    }

    pub fn with_expired(mut self, expired: bool) -> Self {
        self.expired = expired;
        self
    }

    /// True once the entry has used up its whole TTL.
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

// == Cache Snapshot ==
/// Snapshot of the whole cache.
///
/// Expired entries that have not been cleared or overwritten are included.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheSnapshot {
    /// Number of distinct keys currently held
    pub total_entries: usize,
    /// Configured TTL in whole hours
    pub ttl_hours: u64,
    /// Per-key ages, sorted by key
    pub entries: Vec<EntryAge>,
}

impl CacheSnapshot {
    /// Number of listed entries that are already stale.
    pub fn expired_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_expired()).count()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_age_remaining() {
        let age = EntryAge::new("A_auto", 1, 24);
        assert_eq!(age.remaining_hours, 23);
        assert!(!age.is_expired());
    }

    #[test]
    fn test_entry_age_clamps_at_zero() {
        let age = EntryAge::new("A_auto", 30, 24);
        assert_eq!(age.remaining_hours, 0);
        assert!(age.is_expired());
    }

    #[test]
    fn test_expired_flag_overrides_hour_estimate() {
        // 1h into a 90 minute TTL: no whole hour left, still fresh
        let age = EntryAge::new("A_auto", 1, 1).with_expired(false);
        assert_eq!(age.remaining_hours, 0);
        assert!(!age.is_expired());
    }

    #[test]
    fn test_snapshot_expired_count() {
        let snapshot = CacheSnapshot {
            total_entries: 3,
            ttl_hours: 24,
            entries: vec![
                EntryAge::new("a", 0, 24),
                EntryAge::new("b", 24, 24),
                EntryAge::new("c", 48, 24),
            ],
        };
        assert_eq!(snapshot.expired_count(), 2);
    }

    #[test]
    fn test_snapshot_default_is_empty() {
        let snapshot = CacheSnapshot::default();
        assert_eq!(snapshot.total_entries, 0);
        assert!(snapshot.entries.is_empty());
    }
}
