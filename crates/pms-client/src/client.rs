use crate::{error::FetchError, rate_limit::RateLimiter};
use log::debug;
use reqwest::{Client, header::ACCEPT};
use serde_json::Value;
use std::time::Duration;

/// Connection settings for [`PmsClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the PMS, optionally with a path prefix
    pub base_url: String,
    /// Minimum gap between two requests
    pub min_interval: Duration,
    /// Per-request timeout, covering connect and body
    pub timeout: Duration,
}

impl ClientConfig {
    /// Two requests per second
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            min_interval: Self::DEFAULT_MIN_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the PMS API
///
/// Owns the [`RateLimiter`], so every request made through one client shares
/// the same spacing. Requests are strictly sequential.
pub struct PmsClient {
    http: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl PmsClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(config.min_interval),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a rate-limited `GET` and decodes the body as JSON
    ///
    /// # Arguments
    /// * `path` - Absolute API path, e.g. `/api/bookings`
    /// * `query` - Query string pairs, may be empty
    ///
    /// # Returns
    /// The decoded body, or a [`FetchError`] for transport failures, non-2xx
    /// statuses and bodies that are not JSON
    pub async fn fetch_json(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        self.limiter.wait().await;

        let url = format!("{}{path}", self.base_url);
        debug!("GET {url} {query:?}");

        let transport = |source| FetchError::Transport {
            path: path.to_string(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Malformed {
            entity: "JSON",
            path: path.to_string(),
            source,
        })
    }
}
