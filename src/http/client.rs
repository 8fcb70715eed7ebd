//! HTTP client with bounded retry
//!
//! Every page request goes through [`HttpClient::fetch_with_retry`]:
//! - transport failures (connect, DNS, timeout) and every non-2xx status
//!   are retried until `max_attempts` is reached
//! - the delay after failed attempt `n` follows the configured backoff
//!   (linear by default: `base_delay * n`)
//! - the body is read inside the attempt, so a truncated transfer is
//!   retried like any other transport failure

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest error body kept in an `HttpStatus` error
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    /// Base delay for backoff
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Linear,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("pexels-collector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set total attempts per request
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, base: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.base_delay = base;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// A successful (2xx) response, fully read
#[derive(Debug, Clone)]
pub struct Fetched {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// Attempts it took, 1 when the first try succeeded
    pub attempts: u32,
}

/// HTTP client with retry and optional pacing
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    headers: HeaderMap,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_value(key.as_str(), e.to_string()))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_value(key.as_str(), e.to_string()))?;
            if name == reqwest::header::AUTHORIZATION {
                value.set_sensitive(true);
            }
            headers.insert(name, value);
        }

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            headers,
            rate_limiter,
        })
    }

    /// GET `url`, retrying per the configured policy
    ///
    /// Returns the first 2xx response. When every attempt fails the last
    /// failure is wrapped in [`Error::Fetch`].
    pub async fn fetch_with_retry(&self, url: &str) -> Result<Fetched> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let error = match self.send_once(url).await {
                Ok((status, body)) => {
                    debug!("GET {} -> {} (attempt {}/{})", url, status, attempt, max_attempts);
                    return Ok(Fetched {
                        status,
                        body,
                        attempts: attempt,
                    });
                }
                Err(e) => e,
            };

            if attempt >= max_attempts || !error.is_retryable() {
                warn!(
                    "Request failed after {} attempt(s): {}",
                    attempt, error
                );
                return Err(Error::fetch(url, attempt, error));
            }

            if error.is_client_error() {
                debug!("Client error from {}, retrying anyway", url);
            }
            let delay = self.calculate_backoff(attempt);
            warn!(
                "Request error: {}. Retrying in {:?} ({}/{})",
                error, delay, attempt, max_attempts
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// One attempt: send, check status, read body
    async fn send_once(&self, url: &str) -> Result<(u16, String)> {
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), truncate(body)));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        Ok((status.as_u16(), body))
    }

    fn classify(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(error)
        }
    }

    /// Delay after failed attempt `attempt` (1-indexed)
    ///
    /// With linear backoff the wait before attempt `n` is `base * (n - 1)`.
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let base = self.config.base_delay;
        let delay = match self.config.backoff_type {
            BackoffType::Constant => base,
            BackoffType::Linear => base.saturating_mul(attempt),
            BackoffType::Exponential => base.saturating_mul(2u32.saturating_pow(attempt - 1)),
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.config.timeout)
            .field("max_attempts", &self.config.max_attempts)
            .field("backoff_type", &self.config.backoff_type)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}
