//! Cache Store Module
//!
//! HashMap-backed tracking cache with write-time TTL expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::entry::{is_fresh, CacheEntry};
use crate::cache::key::{CacheKey, Carrier};
use crate::cache::stats::{CacheSnapshot, EntryAge};

// == Cache Store ==
/// Tracking results keyed by tracking number and carrier.
///
/// Stale entries are never returned but stay in the map until
/// [`CacheStore::clear_all`] or a newer [`CacheStore::store`] replaces them.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-payload storage
    entries: HashMap<String, CacheEntry>,
    /// How long an entry stays fresh after being written
    ttl: Duration,
    /// Time source for write stamps and freshness checks
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store using the system clock.
    ///
    /// # Arguments
    /// * `ttl` - Freshness window measured from write time
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    // == Lookup ==
    /// Returns the cached payload if one is stored and still fresh.
    ///
    /// Both "never stored" and "stored but expired" are misses. Nothing is
    /// evicted here.
    pub fn lookup(&self, tracking_number: &str, carrier: &Carrier) -> Option<Value> {
        let key = CacheKey::new(tracking_number, carrier);
        let now = self.clock.now_ms();

        match self.entries.get(key.as_str()) {
            Some(entry) if is_fresh(entry, now, self.ttl) => {
                debug!(
                    key = %key,
                    age_hours = entry.age_hours(now),
                    "Cache HIT"
                );
                Some(entry.payload.clone())
            }
            Some(_) => {
                debug!(key = %key, "Cache MISS (expired)");
                None
            }
            None => {
                debug!(key = %key, "Cache MISS");
                None
            }
        }
    }

    // == Store ==
    /// Stores `payload`, replacing any entry under the same key.
    ///
    /// The entry's freshness window restarts from now.
    pub fn store(&mut self, tracking_number: &str, carrier: &Carrier, payload: Value) {
        let key = CacheKey::new(tracking_number, carrier);
        let entry = CacheEntry::new(payload, self.clock.now_ms());

        debug!(key = %key, "Cached tracking data");
        self.entries.insert(key.into_string(), entry);
    }

    // == Stats ==
    /// Reports every held key with its age, expired ones included.
    pub fn stats(&self) -> CacheSnapshot {
        let now = self.clock.now_ms();
        let ttl_hours = self.ttl_hours();

        let mut entries: Vec<EntryAge> = self
            .entries
            .iter()
            .map(|(key, entry)| {
                EntryAge::new(key.as_str(), entry.age_hours(now), ttl_hours)
                    .with_expired(!is_fresh(entry, now, self.ttl))
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        CacheSnapshot {
            total_entries: self.entries.len(),
            ttl_hours,
            entries,
        }
    }

    // == Clear All ==
    /// Removes every entry.
    ///
    /// Returns the number of entries held just before clearing.
    pub fn clear_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Accessors ==
    /// Configured freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Configured freshness window in whole hours.
    pub fn ttl_hours(&self) -> u64 {
        self.ttl.as_secs() / 3600
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
