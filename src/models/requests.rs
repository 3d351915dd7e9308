//! Request DTOs for the tracking API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::Carrier;

/// Request body for `POST /api/track` and `POST /api/register-tracking`
///
/// # Fields
/// - `trackingNumber`: The shipment's tracking number
/// - `carrier`: Optional courier code (auto-detected upstream if absent)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    /// The tracking number
    pub tracking_number: String,
    /// Optional courier code
    #[serde(default)]
    pub carrier: Option<String>,
}

impl TrackRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.tracking_number.trim().is_empty() {
            return Some("trackingNumber cannot be empty".to_string());
        }
        None
    }

    /// Normalized carrier hint.
    pub fn carrier(&self) -> Carrier {
        Carrier::from_optional(self.carrier.as_deref())
    }
}

/// One tracking number or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TrackingNumbers {
    One(String),
    Many(Vec<String>),
}

impl TrackingNumbers {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TrackingNumbers::One(number) => vec![number],
            TrackingNumbers::Many(numbers) => numbers,
        }
    }
}

/// Request body for `POST /api/query-tracking`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// A single tracking number or an array of them
    pub tracking_numbers: TrackingNumbers,
}

impl QueryRequest {
    /// Flattens and validates the tracking numbers.
    pub fn into_numbers(self) -> Result<Vec<String>, String> {
        let numbers = self.tracking_numbers.into_vec();
        if numbers.is_empty() {
            return Err("trackingNumbers cannot be empty".to_string());
        }
        if numbers.iter().any(|n| n.trim().is_empty()) {
            return Err("trackingNumbers cannot contain empty values".to_string());
        }
        Ok(numbers)
    }
}
