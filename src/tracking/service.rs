//! Tracking Service
//!
//! Cache-first lookup of shipment status backed by the upstream provider.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::inflight::{InFlight, Role};
use crate::cache::{CacheKey, CacheStore, Carrier};
use crate::error::UpstreamError;
use crate::upstream::TrackingProvider;

/// Cache store shared between the service and the HTTP handlers.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Tracking Service ==
/// Answers tracking requests from the cache, fetching upstream on a miss.
///
/// At most one upstream fetch runs per key at a time; requests that miss
/// while a fetch is running wait for it and share its outcome.
pub struct TrackingService {
    cache: SharedCache,
    provider: Arc<dyn TrackingProvider>,
    inflight: InFlight,
}

impl TrackingService {
    pub fn new(cache: SharedCache, provider: Arc<dyn TrackingProvider>) -> Self {
        Self {
            cache,
            provider,
            inflight: InFlight::new(),
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn provider(&self) -> &Arc<dyn TrackingProvider> {
        &self.provider
    }

    // == Track ==
    /// Returns the tracking payload for a shipment.
    ///
    /// On a miss this registers the number upstream, queries its status and
    /// caches the query response. Nothing is cached if either call fails.
    /// Requests that miss while a fetch for the same key is running get
    /// that fetch's outcome, whether it succeeded or failed.
    pub async fn track(
        &self,
        tracking_number: &str,
        carrier: &Carrier,
    ) -> Result<Value, UpstreamError> {
        if let Some(payload) = self.cached(tracking_number, carrier).await {
            info!(tracking_number, %carrier, "Returning cached tracking data");
            return Ok(payload);
        }

        let key = CacheKey::new(tracking_number, carrier);
        loop {
            let leader = match self.inflight.join(key.as_str()) {
                Role::Leader(leader) => leader,
                Role::Follower(follower) => match follower.wait().await {
                    Some(outcome) => {
                        debug!(key = %key, "Reusing concurrent fetch");
                        return outcome.map_err(UpstreamError::Shared);
                    }
                    // The fetching request was cancelled; try again.
                    None => continue,
                },
            };

            // A fetch may have finished between the lookup and the join.
            if let Some(payload) = self.cached(tracking_number, carrier).await {
                debug!(key = %key, "Fetched by a concurrent request");
                leader.complete(&Ok(payload.clone()));
                return Ok(payload);
            }

            info!(tracking_number, %carrier, "Cache miss, fetching from Track123");
            let outcome = match self.fetch(tracking_number, carrier).await {
                Ok(payload) => {
                    self.cache
                        .write()
                        .await
                        .store(tracking_number, carrier, payload.clone());
                    Ok(payload)
                }
                Err(err) => {
                    warn!(tracking_number, %carrier, error = %err, "Tracking fetch failed");
                    Err(Arc::new(err))
                }
            };

            leader.complete(&outcome);
            // Unwraps unless a follower still holds the error.
            return outcome.map_err(|err| Arc::try_unwrap(err).unwrap_or_else(UpstreamError::Shared));
        }
    }

    async fn cached(&self, tracking_number: &str, carrier: &Carrier) -> Option<Value> {
        self.cache.read().await.lookup(tracking_number, carrier)
    }

    /// Register, then query. The query response is the result.
    async fn fetch(&self, tracking_number: &str, carrier: &Carrier) -> Result<Value, UpstreamError> {
        let registered = self.provider.register(tracking_number, carrier).await?;
        debug!(tracking_number, response = %registered, "Track123 register response");

        let numbers = [tracking_number.to_string()];
        self.provider.query(&numbers).await
    }
}
