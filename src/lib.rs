//! Track Proxy - Parcel tracking proxy for the Track123 API
//!
//! Relays tracking lookups to Track123 and caches each shipment's result
//! in memory for 24 hours to stay within the provider's rate limits.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tracking;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
