//! API Handlers
//!
//! HTTP request handlers for each tracking proxy endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ApiError, Result, UpstreamError};
use crate::models::{
    CacheStatsResponse, ClearCacheResponse, HealthResponse, QueryRequest, TrackRequest,
};
use crate::tracking::{SharedCache, TrackingService};
use crate::upstream::{Track123Client, TrackingProvider};

/// Application state shared across all handlers.
///
/// The cache is owned by the tracking service and wrapped in
/// Arc<RwLock<>> so handlers can inspect and clear it.
#[derive(Clone)]
pub struct AppState {
    /// Cache-first tracking lookups
    pub tracking: Arc<TrackingService>,
}

impl AppState {
    /// Creates a new AppState from a cache store and an upstream provider.
    pub fn new(cache: CacheStore, provider: Arc<dyn TrackingProvider>) -> Self {
        let cache: SharedCache = Arc::new(RwLock::new(cache));
        Self {
            tracking: Arc::new(TrackingService::new(cache, provider)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache with the configured TTL and a Track123 client.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let cache = CacheStore::new(config.cache_ttl());
        let client = Track123Client::new(&config.upstream)?;
        Ok(Self::new(cache, Arc::new(client)))
    }

    pub fn cache(&self) -> &SharedCache {
        self.tracking.cache()
    }

    pub fn provider(&self) -> &Arc<dyn TrackingProvider> {
        self.tracking.provider()
    }
}

/// Handler for POST /api/track
///
/// Returns the shipment's status, from cache when fresh, otherwise by
/// registering and querying it upstream. Body rejections are answered
/// with the same `{error, message}` shape as every other failure.
pub async fn track_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TrackRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let carrier = req.carrier();
    info!(tracking_number = %req.tracking_number, %carrier, "Combined tracking request");

    let payload = state
        .tracking
        .track(&req.tracking_number, &carrier)
        .await
        .map_err(ApiError::upstream("Failed to fetch tracking data"))?;

    Ok(Json(payload))
}

/// Handler for POST /api/register-tracking
///
/// Registers a tracking number upstream. Not cached.
pub async fn register_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TrackRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let carrier = req.carrier();
    info!(tracking_number = %req.tracking_number, %carrier, "Registering tracking");

    let payload = state
        .provider()
        .register(&req.tracking_number, &carrier)
        .await
        .map_err(ApiError::upstream("Failed to register tracking"))?;

    Ok(Json(payload))
}

/// Handler for POST /api/query-tracking
///
/// Queries one or more tracking numbers upstream. Not cached.
pub async fn query_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = payload?;
    let numbers = req.into_numbers().map_err(ApiError::InvalidRequest)?;
    info!(count = numbers.len(), "Querying tracking");

    let payload = state
        .provider()
        .query(&numbers)
        .await
        .map_err(ApiError::upstream("Failed to query tracking"))?;

    Ok(Json(payload))
}

/// Handler for GET /api/cache/stats
///
/// Lists every cached key with its age, expired entries included.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache().read().await;
    Json(CacheStatsResponse::from(cache.stats()))
}

/// Handler for DELETE /api/cache/clear
///
/// Drops every cached entry.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache().write().await.clear_all();
    info!(cleared, "Tracking cache cleared");

    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /api/health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
