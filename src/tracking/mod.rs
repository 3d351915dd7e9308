//! Tracking Module
//!
//! Cache-first tracking lookups with upstream fetch on a miss.

mod inflight;
mod service;

pub use inflight::{FetchOutcome, FlightFollower, FlightLeader, InFlight, Role};
pub use service::{SharedCache, TrackingService};
