//! Collector configuration
//!
//! A single [`FetcherConfig`] is built once at startup and passed by
//! reference into the walker and the HTTP client. Values are layered:
//! built-in defaults, then an optional YAML file, then environment
//! variables (a `.env` file is honoured), then command-line flags.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, PhotoSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com/v1/";

/// Collection fetched when none is configured
pub const DEFAULT_COLLECTION_ID: &str = "vmnecek";

/// Default location of the URL list
pub const DEFAULT_OUTPUT_PATH: &str = "docs/pexels_photo_urls.txt";

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 80;

// Environment variable names
pub const ENV_API_KEY: &str = "PEXELS_API_KEY";
pub const ENV_BASE_URL: &str = "PEXELS_BASE_URL";
pub const ENV_COLLECTION_ID: &str = "PEXELS_COLLECTION_ID";
pub const ENV_PHOTO_SIZE: &str = "PEXELS_PHOTO_SIZE";
pub const ENV_PER_PAGE: &str = "PEXELS_PER_PAGE";
pub const ENV_OUTPUT_FILE: &str = "PEXELS_OUTPUT_FILE";
pub const ENV_MAX_RETRIES: &str = "PEXELS_MAX_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "PEXELS_RETRY_DELAY_MS";
pub const ENV_REQUEST_TIMEOUT: &str = "PEXELS_REQUEST_TIMEOUT";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete collector configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// API key sent verbatim in the `Authorization` header
    pub api_key: Option<String>,

    /// API root, collection paths are joined onto it
    pub base_url: String,

    /// Collection to walk
    pub collection_id: String,

    /// Size variant extracted from each photo
    pub photo_size: PhotoSize,

    /// Items requested per page (1..=80)
    pub per_page: u32,

    /// Add `type=photos` to the first request
    pub photos_only: bool,

    /// Add `page=<n>` to the first request
    pub start_page: Option<u32>,

    /// Stop after this many pages even if the server links another
    pub max_pages: Option<u32>,

    /// Pause between pages, in milliseconds
    pub page_delay_ms: u64,

    /// Where the URL list is written (`-` for stdout)
    pub output_path: PathBuf,

    /// `User-Agent` header value
    pub user_agent: String,

    /// Retry policy settings
    pub retry: RetryConfig,

    /// Optional request pacing
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            collection_id: DEFAULT_COLLECTION_ID.to_string(),
            photo_size: PhotoSize::Original,
            per_page: MAX_PER_PAGE,
            photos_only: false,
            start_page: None,
            max_pages: None,
            page_delay_ms: 0,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            user_agent: format!("pexels-collector/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
            rate_limit: None,
        }
    }
}

impl std::fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("collection_id", &self.collection_id)
            .field("photo_size", &self.photo_size)
            .field("per_page", &self.per_page)
            .field("photos_only", &self.photos_only)
            .field("start_page", &self.start_page)
            .field("max_pages", &self.max_pages)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("output_path", &self.output_path)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Retry settings for page requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per page, including the first
    pub max_attempts: u32,
    /// Base delay between attempts, in milliseconds
    pub base_delay_ms: u64,
    /// Per-request timeout, in seconds
    pub timeout_secs: u64,
    /// How the delay grows
    pub backoff: BackoffType,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000,
            timeout_secs: 15,
            backoff: BackoffType::Linear,
        }
    }
}

/// Request pacing (the API meters requests per hour)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_hour: u32,
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_burst() -> u32 {
    1
}

impl FetcherConfig {
    /// Load configuration: defaults, optional YAML file, `.env`, environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        // Load .env file if present
        let _ = dotenvy::dotenv();
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(id) = get(ENV_COLLECTION_ID) {
            self.collection_id = id;
        }
        if let Some(size) = get(ENV_PHOTO_SIZE) {
            self.photo_size = size
                .parse()
                .map_err(|e: String| Error::invalid_value(ENV_PHOTO_SIZE, e))?;
        }
        if let Some(n) = get(ENV_PER_PAGE) {
            self.per_page = parse_number(ENV_PER_PAGE, &n)?;
        }
        if let Some(path) = get(ENV_OUTPUT_FILE) {
            self.output_path = PathBuf::from(path);
        }
        if let Some(n) = get(ENV_MAX_RETRIES) {
            self.retry.max_attempts = parse_number(ENV_MAX_RETRIES, &n)?;
        }
        if let Some(n) = get(ENV_RETRY_DELAY_MS) {
            self.retry.base_delay_ms = parse_number(ENV_RETRY_DELAY_MS, &n)?;
        }
        if let Some(n) = get(ENV_REQUEST_TIMEOUT) {
            self.retry.timeout_secs = parse_number(ENV_REQUEST_TIMEOUT, &n)?;
        }
        Ok(())
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(Error::missing_field(ENV_API_KEY)),
        }
        if self.collection_id.trim().is_empty() {
            return Err(Error::missing_field("collection_id"));
        }
        validate_per_page(self.per_page)?;
        if self.retry.max_attempts == 0 {
            return Err(Error::invalid_value(
                "retry.max_attempts",
                "must be at least 1",
            ));
        }
        if self.max_pages == Some(0) {
            return Err(Error::invalid_value("max_pages", "must be at least 1"));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_hour == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_hour",
                    "must be at least 1",
                ));
            }
            if rate_limit.burst_size == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.burst_size",
                    "must be at least 1",
                ));
            }
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        Ok(())
    }

    /// API key, or a config error if unset
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::missing_field(ENV_API_KEY))
    }

    /// Last four characters of the key, safe for logs
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if key.chars().count() > 4 => {
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("...{tail}")
            }
            Some(_) => "...".to_string(),
            None => "<unset>".to_string(),
        }
    }

    /// Pause between pages
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Build the HTTP client configuration for this run
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        let base_delay = Duration::from_millis(self.retry.base_delay_ms);
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.retry.timeout_secs))
            .max_attempts(self.retry.max_attempts)
            .backoff(
                self.retry.backoff,
                base_delay,
                base_delay.saturating_mul(self.retry.max_attempts.max(1)),
            )
            .header("Authorization", self.api_key()?)
            .user_agent(&self.user_agent);

        if let Some(limit) = &self.rate_limit {
            builder = builder.rate_limit(RateLimiterConfig::per_hour(
                limit.requests_per_hour,
                limit.burst_size,
            ));
        }

        Ok(builder.build())
    }
}

/// Reject page sizes the API would refuse or clamp
pub fn validate_per_page(per_page: u32) -> Result<()> {
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(Error::invalid_value(
            "per_page",
            format!("must be between 1 and {MAX_PER_PAGE}, got {per_page}"),
        ));
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_value(field, format!("'{raw}' is not a valid number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn valid() -> FetcherConfig {
        FetcherConfig {
            api_key: Some("secret-key-1234".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.collection_id, "vmnecek");
        assert_eq!(config.photo_size, PhotoSize::Original);
        assert_eq!(config.per_page, 80);
        assert_eq!(config.output_path, PathBuf::from("docs/pexels_photo_urls.txt"));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay_ms, 2000);
        assert_eq!(config.retry.timeout_secs, 15);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = FetcherConfig::default().validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == ENV_API_KEY));

        let blank = FetcherConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_validate_ok() {
        valid().validate().unwrap();
    }

    #[test]
    fn test_validate_per_page_bounds() {
        let mut config = valid();
        config.per_page = 0;
        assert!(config.validate().is_err());
        config.per_page = 81;
        assert!(config.validate().is_err());
        config.per_page = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_attempts_and_pages() {
        let mut config = valid();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.max_pages = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rate_limit() {
        let mut config = valid();
        config.rate_limit = Some(RateLimitConfig {
            requests_per_hour: 0,
            burst_size: 1,
        });
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "rate_limit.requests_per_hour")
        );

        config.rate_limit = Some(RateLimitConfig {
            requests_per_hour: 200,
            burst_size: 0,
        });
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "rate_limit.burst_size")
        );

        config.rate_limit = Some(RateLimitConfig {
            requests_per_hour: 200,
            burst_size: 1,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = valid();
        config.base_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = FetcherConfig::default();
        config
            .apply_env_with(env(&[
                (ENV_API_KEY, "abc123456"),
                (ENV_COLLECTION_ID, "xbncfpg"),
                (ENV_PHOTO_SIZE, "large2x"),
                (ENV_PER_PAGE, "40"),
                (ENV_OUTPUT_FILE, "out/urls.txt"),
                (ENV_MAX_RETRIES, "5"),
                (ENV_RETRY_DELAY_MS, "100"),
                (ENV_REQUEST_TIMEOUT, "3"),
            ]))
            .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc123456"));
        assert_eq!(config.collection_id, "xbncfpg");
        assert_eq!(config.photo_size, PhotoSize::Large2x);
        assert_eq!(config.per_page, 40);
        assert_eq!(config.output_path, PathBuf::from("out/urls.txt"));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 100);
        assert_eq!(config.retry.timeout_secs, 3);
    }

    #[test]
    fn test_env_blank_values_ignored() {
        let mut config = FetcherConfig::default();
        config
            .apply_env_with(env(&[(ENV_COLLECTION_ID, ""), (ENV_API_KEY, " ")]))
            .unwrap();
        assert_eq!(config.collection_id, DEFAULT_COLLECTION_ID);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_env_invalid_number() {
        let mut config = FetcherConfig::default();
        let err = config
            .apply_env_with(env(&[(ENV_PER_PAGE, "eighty")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == ENV_PER_PAGE));
    }

    #[test]
    fn test_env_invalid_size() {
        let mut config = FetcherConfig::default();
        let err = config
            .apply_env_with(env(&[(ENV_PHOTO_SIZE, "gigantic")]))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
collection_id: abc
photo_size: medium
per_page: 20
photos_only: true
max_pages: 4
retry:
  max_attempts: 5
  base_delay_ms: 10
rate_limit:
  requests_per_hour: 200
";
        let config = FetcherConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.collection_id, "abc");
        assert_eq!(config.photo_size, PhotoSize::Medium);
        assert_eq!(config.per_page, 20);
        assert!(config.photos_only);
        assert_eq!(config.max_pages, Some(4));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 10);
        // Unspecified nested fields keep their defaults
        assert_eq!(config.retry.timeout_secs, 15);
        assert_eq!(
            config.rate_limit,
            Some(RateLimitConfig {
                requests_per_hour: 200,
                burst_size: 1
            })
        );
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = FetcherConfig::from_yaml_str("photo_size: [1, 2]").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collector.yaml");
        std::fs::write(&path, "collection_id: fromfile\n").unwrap();

        let config = FetcherConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.collection_id, "fromfile");

        let missing = FetcherConfig::from_yaml_file(&dir.path().join("nope.yaml"));
        assert!(missing.unwrap_err().is_config());
    }

    #[test]
    fn test_masked_api_key() {
        assert_eq!(valid().masked_api_key(), "...1234");
        assert_eq!(FetcherConfig::default().masked_api_key(), "<unset>");

        let short = FetcherConfig {
            api_key: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(short.masked_api_key(), "...");

        let debug = format!("{:?}", valid());
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("...1234"));
    }

    #[test]
    fn test_http_client_config() {
        let mut config = valid();
        config.retry.max_attempts = 4;
        config.retry.base_delay_ms = 250;
        config.retry.timeout_secs = 7;

        let http = config.http_client_config().unwrap();
        assert_eq!(http.max_attempts, 4);
        assert_eq!(http.base_delay, Duration::from_millis(250));
        assert_eq!(http.max_backoff, Duration::from_millis(1000));
        assert_eq!(http.timeout, Duration::from_secs(7));
        assert_eq!(http.backoff_type, BackoffType::Linear);
        assert_eq!(
            http.default_headers.get("Authorization"),
            Some(&"secret-key-1234".to_string())
        );
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_http_client_config_requires_key() {
        assert!(FetcherConfig::default().http_client_config().is_err());
    }
}
