//! Request and Response models for the tracking API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{QueryRequest, TrackRequest, TrackingNumbers};
pub use responses::{
    CacheStatsResponse, CachedItem, ClearCacheResponse, ErrorResponse, HealthResponse,
};
