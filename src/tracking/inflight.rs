//! In-Flight Fetch Table
//!
//! Tracks the upstream fetch running for each key so concurrent misses
//! for one shipment wait on it instead of starting their own. The fetch
//! outcome, success or failure, is handed to every waiter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::watch;

use crate::error::UpstreamError;

/// Result of one upstream fetch as seen by everyone waiting on it.
pub type FetchOutcome = Result<Value, Arc<UpstreamError>>;

type OutcomeSlot = watch::Receiver<Option<FetchOutcome>>;

#[derive(Debug)]
struct Flight {
    id: u64,
    outcome: OutcomeSlot,
}

/// Table of keys with a fetch currently in progress.
#[derive(Debug, Default)]
pub struct InFlight {
    flights: Mutex<HashMap<String, Flight>>,
    next_id: AtomicU64,
}

/// Part a caller plays for one key after [`InFlight::join`].
#[derive(Debug)]
pub enum Role<'a> {
    /// No fetch was running; the caller runs it and must publish the result.
    Leader(FlightLeader<'a>),
    /// A fetch is already running; wait on it.
    Follower(FlightFollower),
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the fetch for `key`, starting a new one if none is running.
    pub fn join(&self, key: &str) -> Role<'_> {
        let mut flights = self.table();
        if let Some(flight) = flights.get(key) {
            return Role::Follower(FlightFollower {
                outcome: flight.outcome.clone(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, outcome) = watch::channel(None);
        flights.insert(key.to_string(), Flight { id, outcome });

        Role::Leader(FlightLeader {
            table: self,
            key: key.to_string(),
            id,
            sender,
        })
    }

    /// Number of keys with a fetch running.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Flight>> {
        // The map stays consistent even if a holder panicked.
        self.flights.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Drops the entry for `key` if it still belongs to flight `id`.
    fn finish(&self, key: &str, id: u64) {
        let mut flights = self.table();
        if flights.get(key).is_some_and(|flight| flight.id == id) {
            flights.remove(key);
        }
    }
}

// == Leader ==
/// The caller running the fetch for one key.
///
/// Dropping the leader without calling [`FlightLeader::complete`] (for
/// example when its request is cancelled) frees the key and wakes the
/// followers, which then start over.
#[derive(Debug)]
pub struct FlightLeader<'a> {
    table: &'a InFlight,
    key: String,
    id: u64,
    sender: watch::Sender<Option<FetchOutcome>>,
}

impl FlightLeader<'_> {
    /// Frees the key and hands `outcome` to every follower.
    pub fn complete(self, outcome: &FetchOutcome) {
        self.table.finish(&self.key, self.id);
        // Sending fails only when nobody is waiting.
        let _ = self.sender.send(Some(outcome.clone()));
    }
}

impl Drop for FlightLeader<'_> {
    fn drop(&mut self) {
        self.table.finish(&self.key, self.id);
    }
}

// == Follower ==
/// A caller waiting on a fetch started by someone else.
#[derive(Debug)]
pub struct FlightFollower {
    outcome: OutcomeSlot,
}

impl FlightFollower {
    /// Waits for the leader's outcome.
    ///
    /// Returns `None` if the leader went away without finishing.
    pub async fn wait(mut self) -> Option<FetchOutcome> {
        let outcome = self.outcome.wait_for(Option::is_some).await.ok()?;
        (*outcome).clone()
    }
}
