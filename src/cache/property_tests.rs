//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache invariants against arbitrary keys,
//! payloads and clock offsets.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, CacheStore, Carrier, ManualClock};

// == Test Configuration ==
const TTL: Duration = Duration::from_secs(24 * 60 * 60);
const TTL_MS: u64 = 24 * 60 * 60 * 1000;
const START_MS: u64 = 1_700_000_000_000;

fn fresh_store() -> (CacheStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START_MS));
    (CacheStore::with_clock(TTL, clock.clone()), clock)
}

// == Strategies ==
/// Tracking numbers, including the empty string
fn tracking_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{0,22}".prop_map(|s| s)
}

/// Carriers, mixing auto-detect with named couriers
fn carrier_strategy() -> impl Strategy<Value = Carrier> {
    prop_oneof![
        Just(Carrier::Auto),
        "[a-z][a-z-]{1,15}".prop_map(|s| Carrier::from(s.as_str())),
    ]
}

/// Small JSON payloads shaped like upstream responses
fn payload_strategy() -> impl Strategy<Value = Value> {
    ("[a-z_]{1,12}", prop::collection::vec("[a-zA-Z ]{0,20}", 0..5)).prop_map(
        |(status, events)| json!({ "code": "00000", "data": { "status": status, "events": events } }),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // store then lookup with the same pair returns the payload unchanged
    #[test]
    fn prop_roundtrip(
        tn in tracking_number_strategy(),
        carrier in carrier_strategy(),
        payload in payload_strategy()
    ) {
        let (mut store, _) = fresh_store();
        store.store(&tn, &carrier, payload.clone());
        prop_assert_eq!(store.lookup(&tn, &carrier), Some(payload));
    }

    // a second store under the same pair replaces the first
    #[test]
    fn prop_last_write_wins(
        tn in tracking_number_strategy(),
        carrier in carrier_strategy(),
        p1 in payload_strategy(),
        p2 in payload_strategy()
    ) {
        let (mut store, clock) = fresh_store();
        store.store(&tn, &carrier, p1);
        clock.advance(Duration::from_secs(1));
        store.store(&tn, &carrier, p2.clone());

        prop_assert_eq!(store.lookup(&tn, &carrier), Some(p2));
        prop_assert_eq!(store.len(), 1);
    }

    // hit strictly inside the TTL, miss from the TTL onwards
    #[test]
    fn prop_ttl_boundary(
        tn in tracking_number_strategy(),
        carrier in carrier_strategy(),
        delta in 0u64..(TTL_MS * 3)
    ) {
        let (mut store, clock) = fresh_store();
        store.store(&tn, &carrier, json!({"ok": true}));
        clock.set(START_MS + delta);

        let hit = store.lookup(&tn, &carrier).is_some();
        prop_assert_eq!(hit, delta < TTL_MS);
    }

    // auto-detect and an explicit carrier never satisfy each other
    #[test]
    fn prop_carrier_independence(
        tn in tracking_number_strategy(),
        courier in "[a-z][a-z-]{1,15}",
        payload in payload_strategy()
    ) {
        prop_assume!(!courier.eq_ignore_ascii_case("auto"));
        let named = Carrier::from(courier.as_str());

        let (mut store, _) = fresh_store();
        store.store(&tn, &Carrier::Auto, payload.clone());
        prop_assert!(store.lookup(&tn, &named).is_none());

        let (mut store, _) = fresh_store();
        store.store(&tn, &named, payload);
        prop_assert!(store.lookup(&tn, &Carrier::Auto).is_none());
    }

    // clear_all reports the prior entry count and leaves nothing behind
    #[test]
    fn prop_clear_all(
        pairs in prop::collection::vec((tracking_number_strategy(), carrier_strategy()), 0..30)
    ) {
        let (mut store, _) = fresh_store();
        let distinct: HashSet<CacheKey> = pairs
            .iter()
            .map(|(tn, c)| CacheKey::new(tn, c))
            .collect();

        for (tn, carrier) in &pairs {
            store.store(tn, carrier, json!(tn));
        }
        prop_assert_eq!(store.stats().total_entries, distinct.len());

        prop_assert_eq!(store.clear_all(), distinct.len());
        for (tn, carrier) in &pairs {
            prop_assert!(store.lookup(tn, carrier).is_none());
        }
    }

    // ages never go backwards between two stats calls without a store
    #[test]
    fn prop_stats_age_non_decreasing(
        tn in tracking_number_strategy(),
        first in 0u64..(TTL_MS * 2),
        second in 0u64..(TTL_MS * 2)
    ) {
        let (mut store, clock) = fresh_store();
        store.store(&tn, &Carrier::Auto, json!(null));

        clock.set(START_MS + first);
        let before = store.stats().entries[0].age_hours;
        clock.set(START_MS + first + second);
        let after = store.stats().entries[0].age_hours;

        prop_assert!(after >= before);
        prop_assert_eq!(store.stats().total_entries, 1);
    }
}
