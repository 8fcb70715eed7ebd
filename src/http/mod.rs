//! HTTP client module
//!
//! Wraps each page request in a bounded retry policy.
//!
//! # Features
//!
//! - **Bounded Retries**: every transport failure or non-2xx status is retried
//!   up to `max_attempts` times
//! - **Backoff Strategies**: linear by default, constant and exponential available
//! - **Pacing**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{Fetched, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
