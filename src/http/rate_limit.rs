//! Request pacing
//!
//! Uses the governor crate for token bucket rate limiting. The API meters
//! keys per hour, so quotas are expressed as a request count over a period.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Requests allowed per `period`
    pub max_requests: u32,
    /// Replenishment window
    pub period: Duration,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl RateLimiterConfig {
    /// `max_requests` per hour
    pub fn per_hour(max_requests: u32, burst_size: u32) -> Self {
        Self {
            max_requests,
            period: Duration::from_secs(3600),
            burst_size,
        }
    }

    /// `max_requests` per second
    pub fn per_second(max_requests: u32, burst_size: u32) -> Self {
        Self {
            max_requests,
            period: Duration::from_secs(1),
            burst_size,
        }
    }

    /// Time between token replenishments
    pub fn replenish_interval(&self) -> Duration {
        self.period / self.max_requests.max(1)
    }

    fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(self.replenish_interval())
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX))
            .allow_burst(burst)
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(config.quota())),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}
