//! Upstream Module
//!
//! Client for the third-party tracking provider (Track123).
//!
//! The provider uses a two-call protocol: a tracking number is first
//! registered (`/track/import`), then its status is queried
//! (`/track/query`).

mod client;
mod retry;

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::Carrier;
use crate::error::UpstreamError;

pub use client::Track123Client;
pub use retry::RetryPolicy;

// == Tracking Provider ==
/// Upstream tracking API.
///
/// Responses are returned as raw JSON so they can be cached and relayed
/// without interpretation.
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    /// Registers a tracking number, optionally pinned to a courier.
    async fn register(
        &self,
        tracking_number: &str,
        carrier: &Carrier,
    ) -> Result<Value, UpstreamError>;

    /// Fetches the current status of one or more tracking numbers.
    async fn query(&self, tracking_numbers: &[String]) -> Result<Value, UpstreamError>;
}
