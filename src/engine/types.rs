//! Engine types
//!
//! Configuration, statistics and the result of a collection walk.

use crate::config::FetcherConfig;
use crate::decode::MissingVariant;
use std::time::Duration;

/// Configuration for a walk beyond the per-call arguments
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Add `type=photos` to the first request
    pub photos_only: bool,
    /// Add `page=<n>` to the first request
    pub start_page: Option<u32>,
    /// Stop after this many pages
    pub max_pages: Option<u32>,
    /// Pause before each follow-up page
    pub page_delay: Duration,
}

impl WalkConfig {
    /// Create a new walk config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the listing to photos server-side
    #[must_use]
    pub fn with_photos_only(mut self, photos_only: bool) -> Self {
        self.photos_only = photos_only;
        self
    }

    /// Start from a given page
    #[must_use]
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = Some(page);
        self
    }

    /// Cap the number of pages
    #[must_use]
    pub fn with_max_pages(mut self, max: u32) -> Self {
        self.max_pages = Some(max);
        self
    }

    /// Pause between pages
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }
}

impl From<&FetcherConfig> for WalkConfig {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            photos_only: config.photos_only,
            start_page: config.start_page,
            max_pages: config.max_pages,
            page_delay: config.page_delay(),
        }
    }
}

/// Statistics from a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// HTTP attempts across all pages, retries included
    pub attempts: u32,
    /// Media items seen
    pub media_items: usize,
    /// Photo items seen
    pub photos: usize,
    /// Non-photo items skipped
    pub skipped: usize,
    /// Photos lacking the requested size
    pub missing_variant: usize,
    /// Collection size as last reported by the server
    pub total_results: Option<u64>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl WalkStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a fetched page and the attempts it took
    pub fn add_page(&mut self, attempts: u32) {
        self.pages_fetched += 1;
        self.attempts += attempts;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Everything a successful walk produced
#[derive(Debug, Clone, Default)]
pub struct WalkReport {
    /// Extracted URLs in API order, duplicates preserved
    pub urls: Vec<String>,
    /// Photos skipped for lacking the requested size
    pub warnings: Vec<MissingVariant>,
    pub stats: WalkStats,
}

impl WalkReport {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}
