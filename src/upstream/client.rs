//! Track123 Client
//!
//! reqwest-based implementation of [`TrackingProvider`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{RetryPolicy, TrackingProvider};
use crate::cache::Carrier;
use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

/// Header carrying the API secret.
const API_SECRET_HEADER: &str = "Track123-Api-Secret";

/// One item of the `/track/import` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportItem<'a> {
    track_no: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    courier_code: Option<&'a str>,
}

/// `/track/query` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    track_nos: &'a [String],
}

// == Track123 Client ==
/// HTTP client for the Track123 open API.
#[derive(Debug, Clone)]
pub struct Track123Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl Track123Client {
    /// Builds a client from upstream settings.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            retry: RetryPolicy::from_config(config),
        })
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Request Plumbing ==
    /// POSTs `body` to `path`, retrying transient failures.
    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value, UpstreamError> {
        let mut attempt = 0;
        loop {
            match self.send_once(path, body).await {
                Ok(value) => return Ok(value),
                Err(err) => match self.retry.should_retry(attempt, &err) {
                    Some(delay) => {
                        warn!(
                            path,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "Track123 request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => return Err(err),
                },
            }
        }
    }

    async fn send_once<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .header(API_SECRET_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(path, status = status.as_u16(), "Track123 response received");
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TrackingProvider for Track123Client {
    async fn register(
        &self,
        tracking_number: &str,
        carrier: &Carrier,
    ) -> Result<Value, UpstreamError> {
        let items = [ImportItem {
            track_no: tracking_number,
            courier_code: carrier.courier_code(),
        }];
        self.post_json("/track/import", &items).await
    }

    async fn query(&self, tracking_numbers: &[String]) -> Result<Value, UpstreamError> {
        let body = QueryBody {
            track_nos: tracking_numbers,
        };
        self.post_json("/track/query", &body).await
    }
}
