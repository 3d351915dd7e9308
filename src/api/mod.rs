//! API Module
//!
//! HTTP handlers and routing for the tracking proxy REST API.
//!
//! # Endpoints
//! - `POST /api/track` - Tracking status with 24h caching
//! - `POST /api/register-tracking` - Register a tracking number upstream
//! - `POST /api/query-tracking` - Query tracking numbers upstream
//! - `GET /api/cache/stats` - Cache contents and ages
//! - `DELETE /api/cache/clear` - Clear the whole cache
//! - `GET /api/health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
