//! Error types for the Pexels collector
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! Errors fall into three fatal families (configuration, fetch, parse)
//! plus output I/O. Missing size variants are not errors; they are
//! reported as warnings by the walker.

use thiserror::Error;

/// The main error type for the collector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request to {url} failed after {attempts} attempt(s): {source}")]
    Fetch {
        url: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Parse Errors
    // ============================================================================
    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {message}")]
    Output { message: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Wrap the last attempt's error once retries are exhausted
    pub fn fetch(url: impl Into<String>, attempts: u32, source: Error) -> Self {
        Self::Fetch {
            url: url.into(),
            attempts,
            source: Box::new(source),
        }
    }

    /// Create a parse error for a response body
    pub fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Every transport failure and every non-2xx status counts, client
    /// errors included.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }

    /// Check if this error (or the cause of an exhausted fetch) is a 4xx
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => (400..500).contains(status),
            Error::Fetch { source, .. } => source.is_client_error(),
            _ => false,
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::InvalidConfigValue { .. }
                | Error::YamlParse(_)
        )
    }

    /// Check if this is a response parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::JsonParse(_))
    }
}

/// Result type alias for the collector
pub type Result<T> = std::result::Result<T, Error>;
