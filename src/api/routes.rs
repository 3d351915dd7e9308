//! API Routes
//!
//! Configures the Axum router with all tracking proxy endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, health_handler, query_handler, register_handler,
    track_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/track` - Cached register + query
/// - `POST /api/register-tracking` - Register a tracking number
/// - `POST /api/query-tracking` - Query tracking numbers
/// - `GET /api/cache/stats` - List cached entries and their ages
/// - `DELETE /api/cache/clear` - Drop every cached entry
/// - `GET /api/health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the storefront is served from elsewhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/track", post(track_handler))
        .route("/api/register-tracking", post(register_handler))
        .route("/api/query-tracking", post(query_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache/clear", delete(clear_cache_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, Carrier};
    use crate::error::UpstreamError;
    use crate::upstream::TrackingProvider;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    struct EchoProvider;

    #[async_trait]
    impl TrackingProvider for EchoProvider {
        async fn register(&self, tracking_number: &str, _: &Carrier) -> Result<Value, UpstreamError> {
            Ok(json!({"accepted": [tracking_number]}))
        }

        async fn query(&self, tracking_numbers: &[String]) -> Result<Value, UpstreamError> {
            Ok(json!({"content": tracking_numbers}))
        }
    }

    fn create_test_app() -> Router {
        let cache = CacheStore::new(Duration::from_secs(86_400));
        let state = AppState::new(cache, Arc::new(EchoProvider));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_track_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/track")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"trackingNumber":"TM1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_clear_requires_delete() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/cache/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
