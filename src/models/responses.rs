//! Response DTOs for the tracking API
//!
//! Defines the structure of outgoing HTTP response bodies. Tracking
//! endpoints relay the upstream JSON as-is and have no DTO here.

use serde::Serialize;

use crate::cache::{CacheSnapshot, EntryAge};

/// One row of the cache stats listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedItem {
    /// Cache key (`{trackingNumber}_{carrier}`)
    pub key: String,
    /// Hours since the entry was fetched
    pub age_hours: u64,
    /// Hours until the entry goes stale (zero once expired)
    pub expires_in_hours: u64,
}

impl From<EntryAge> for CachedItem {
    fn from(age: EntryAge) -> Self {
        Self {
            key: age.key,
            age_hours: age.age_hours,
            expires_in_hours: age.remaining_hours,
        }
    }
}

/// Response body for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    /// Number of cached keys, expired ones included
    pub total_cached: usize,
    /// Human-readable TTL, e.g. "24 hours"
    pub cache_duration: String,
    /// Per-key ages
    pub cached_items: Vec<CachedItem>,
}

impl From<CacheSnapshot> for CacheStatsResponse {
    fn from(snapshot: CacheSnapshot) -> Self {
        Self {
            total_cached: snapshot.total_entries,
            cache_duration: format!("{} hours", snapshot.ttl_hours),
            cached_items: snapshot.entries.into_iter().map(CachedItem::from).collect(),
        }
    }
}

/// Response body for `DELETE /api/cache/clear`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    /// Summary message
    pub message: String,
    /// Number of entries removed
    pub cleared_count: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared_count: usize) -> Self {
        Self {
            message: format!("Cleared {} cached items", cleared_count),
            cleared_count,
        }
    }
}

/// Response body for the health endpoint (`GET /api/health`)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("OK")
    pub status: String,
    /// Service description
    pub message: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Track123 server is running".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// What the endpoint failed to do
    pub error: String,
    /// Underlying cause
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_stats_response_shape() {
        let snapshot = CacheSnapshot {
            total_entries: 1,
            ttl_hours: 24,
            entries: vec![EntryAge::new("TM1_auto", 3, 24)],
        };
        let resp = CacheStatsResponse::from(snapshot);
        assert_eq!(
            serde_json::to_value(resp).unwrap(),
            json!({
                "totalCached": 1,
                "cacheDuration": "24 hours",
                "cachedItems": [{"key": "TM1_auto", "ageHours": 3, "expiresInHours": 21}]
            })
        );
    }

    #[test]
    fn test_clear_cache_response_serialize() {
        let resp = ClearCacheResponse::new(4);
        assert_eq!(
            serde_json::to_value(resp).unwrap(),
            json!({"message": "Cleared 4 cached items", "clearedCount": 4})
        );
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"OK\""));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Failed to fetch tracking data", "timeout");
        assert_eq!(
            serde_json::to_value(resp).unwrap(),
            json!({"error": "Failed to fetch tracking data", "message": "timeout"})
        );
    }
}
