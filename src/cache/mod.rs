//! Cache Module
//!
//! In-memory tracking cache with write-time TTL expiry and manual clearing.

pub mod clock;
mod entry;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{is_fresh, CacheEntry, HOUR_MS};
pub use key::{CacheKey, Carrier, AUTO_CARRIER};
pub use stats::{CacheSnapshot, EntryAge};
pub use store::CacheStore;

// == Public Constants ==
/// Default freshness window for tracking results
pub const DEFAULT_TTL_HOURS: u64 = 24;
