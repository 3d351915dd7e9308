//! Error types for the tracking proxy
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Upstream Error Enum ==
/// Failure talking to the upstream tracking provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure: connect, timeout, TLS, body read
    #[error("Track123 request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("Track123 API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Provider answered 2xx with a body that is not JSON
    #[error("Track123 returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Outcome of a fetch handed to every request waiting on it
    #[error(transparent)]
    Shared(Arc<UpstreamError>),
}

impl UpstreamError {
    /// Whether retrying the same request may succeed.
    ///
    /// Timeouts, connection failures, 429 and 5xx are transient; anything
    /// else is returned to the caller straight away.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Network(e) => e.is_timeout() || e.is_connect(),
            UpstreamError::Status { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::Decode(_) => false,
            UpstreamError::Shared(inner) => inner.is_transient(),
        }
    }
}

// == API Error Enum ==
/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request body is missing, is not JSON, or has the wrong shape
    #[error("Invalid request: {0}")]
    Rejected(#[from] JsonRejection),

    /// Upstream call behind the endpoint failed
    #[error("{action}: {source}")]
    Upstream {
        /// Short description of what the endpoint was doing
        action: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    /// Wraps an upstream failure with the endpoint's action label.
    pub fn upstream(action: &'static str) -> impl FnOnce(UpstreamError) -> ApiError {
        move |source| ApiError::Upstream { action, source }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid request", msg.clone()),
            ),
            ApiError::Rejected(rejection) => (
                rejection.status(),
                ErrorResponse::new("Invalid request", rejection.body_text()),
            ),
            ApiError::Upstream { action, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(*action, source.to_string()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
