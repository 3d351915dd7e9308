//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_HOURS;

/// Track123 open API base URL.
pub const DEFAULT_TRACK123_BASE_URL: &str = "https://api.track123.com/gateway/open-api/tk/v2";

/// Upstream tracking provider settings.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API secret sent as `Track123-Api-Secret`
    pub api_key: String,
    /// Base URL that `/track/import` and `/track/query` are appended to
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after the first attempt on transient failures
    pub max_retries: u32,
    /// First backoff delay in milliseconds, doubled per retry
    pub retry_delay_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_TRACK123_BASE_URL.to_string(),
            timeout_secs: 15,
            max_retries: 2,
            retry_delay_ms: 250,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Hours a tracking result stays fresh after being fetched
    pub cache_ttl_hours: u64,
    /// Track123 client settings
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3001)
    /// - `CACHE_TTL_HOURS` - Tracking cache TTL in hours (default: 24)
    /// - `TRACK123_API_KEY` - Track123 API secret (default: empty)
    /// - `TRACK123_BASE_URL` - Track123 API base URL
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 15)
    /// - `UPSTREAM_MAX_RETRIES` - Retries on transient failures (default: 2)
    /// - `UPSTREAM_RETRY_DELAY_MS` - Initial backoff delay (default: 250)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT", defaults.server_port),
            cache_ttl_hours: parse_var("CACHE_TTL_HOURS", defaults.cache_ttl_hours),
            upstream: UpstreamConfig {
                api_key: env::var("TRACK123_API_KEY").unwrap_or(defaults.upstream.api_key),
                base_url: env::var("TRACK123_BASE_URL")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(defaults.upstream.base_url),
                timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS", defaults.upstream.timeout_secs),
                max_retries: parse_var("UPSTREAM_MAX_RETRIES", defaults.upstream.max_retries),
                retry_delay_ms: parse_var(
                    "UPSTREAM_RETRY_DELAY_MS",
                    defaults.upstream.retry_delay_ms,
                ),
            },
        }
    }

    /// Cache TTL as a Duration.
    ///
    /// Saturates for hour counts too large to express in seconds.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(60 * 60))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3001,
            cache_ttl_hours: DEFAULT_TTL_HOURS,
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Reads and parses `name`, falling back to `default` when unset or invalid.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
