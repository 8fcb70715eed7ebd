//! Execution engine module
//!
//! The page walk over a collection.
//!
//! # Overview
//!
//! The engine module provides:
//! - `CollectionWalker` - Follows `next_page` links and accumulates photo URLs
//! - `WalkConfig` - First-request options and page limits
//! - `WalkReport` / `WalkStats` - What a walk produced
//!
//! A walk is all-or-nothing: if any page fails to fetch or decode, the
//! error is returned and the URLs gathered so far are dropped.

mod types;

pub use types::{WalkConfig, WalkReport, WalkStats};

use crate::config::{validate_per_page, FetcherConfig};
use crate::decode::{decode_page, extract_urls, DecodedPage, PageResponse};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{NextUrlPaginator, PageLimit, PaginationState, Paginator};
use crate::types::PhotoSize;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Walks a collection page by page
#[derive(Debug)]
pub struct CollectionWalker {
    /// HTTP client
    client: HttpClient,
    /// API root
    base_url: Url,
    /// Walk configuration
    config: WalkConfig,
}

impl CollectionWalker {
    /// Create a new walker against `base_url`
    pub fn new(client: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value("base_url", "must be a hierarchical URL"));
        }
        Ok(Self {
            client,
            base_url,
            config: WalkConfig::default(),
        })
    }

    /// Build a walker, client included, from the collector configuration
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_client_config()?)?;
        Ok(Self::new(client, &config.base_url)?.with_config(WalkConfig::from(config)))
    }

    /// Set walk configuration
    #[must_use]
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the walk configuration
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// URL of the first page of a collection
    pub fn collection_url(&self, collection_id: &str, per_page: u32) -> Result<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "must be a hierarchical URL"))?
            .pop_if_empty()
            .push("collections")
            .push(collection_id);

        {
            let mut query = url.query_pairs_mut();
            if self.config.photos_only {
                query.append_pair("type", "photos");
            }
            query.append_pair("per_page", &per_page.to_string());
            if let Some(page) = self.config.start_page {
                query.append_pair("page", &page.to_string());
            }
        }

        Ok(url.into())
    }

    /// Walk with the collection, page size and variant from `config`
    pub async fn walk_config(&self, config: &FetcherConfig) -> Result<WalkReport> {
        self.walk(&config.collection_id, config.per_page, config.photo_size)
            .await
    }

    /// Collect the `size` URL of every photo in a collection
    ///
    /// Pages are fetched strictly one after another, each through the
    /// client's retry policy. Fails on the first page that cannot be fetched
    /// or decoded.
    pub async fn walk(
        &self,
        collection_id: &str,
        per_page: u32,
        size: PhotoSize,
    ) -> Result<WalkReport> {
        validate_per_page(per_page)?;
        let start = Instant::now();

        info!("Fetching photos from collection ID: {}", collection_id);

        let paginator: Box<dyn Paginator> = match self.config.max_pages {
            Some(max) => Box::new(PageLimit::new(NextUrlPaginator::default(), max)),
            None => Box::new(NextUrlPaginator::default()),
        };

        let mut report = WalkReport::default();
        let mut state = PaginationState::new();
        let mut next_url = Some(self.collection_url(collection_id, per_page)?);

        while let Some(url) = next_url.take() {
            info!("Fetching data from URL: {}", url);

            let decoded = match self.fetch_page(&url).await {
                Ok((decoded, attempts)) => {
                    report.stats.add_page(attempts);
                    decoded
                }
                Err(e) => {
                    if !report.urls.is_empty() {
                        warn!(
                            "Discarding {} URL(s) collected before the failure",
                            report.urls.len()
                        );
                    }
                    return Err(e);
                }
            };
            let page = &decoded.page;

            log_page(page);
            if page.total_results.is_some() {
                report.stats.total_results = page.total_results;
            }

            let extraction = extract_urls(&page.media, size);
            for missing in &extraction.missing {
                warn!("{}", missing);
            }

            report.stats.media_items += page.media.len();
            report.stats.photos += extraction.photos;
            report.stats.skipped += extraction.skipped;
            report.stats.missing_variant += extraction.missing.len();
            report.urls.extend(extraction.urls);
            report.warnings.extend(extraction.missing);

            let next = paginator.process_response(&decoded.raw, page.media.len(), &mut state);
            next_url = next.url().map(str::to_string);

            if next_url.is_some() && !self.config.page_delay.is_zero() {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }

        report
            .stats
            .set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Finished fetching. Total photo URLs collected: {} ({} pages, {} attempts)",
            report.urls.len(),
            report.stats.pages_fetched,
            report.stats.attempts
        );

        Ok(report)
    }

    /// Fetch a single one-item page to check credentials and the collection
    pub async fn probe(&self, collection_id: &str) -> Result<PageResponse> {
        let url = self.collection_url(collection_id, 1)?;
        let (decoded, _) = self.fetch_page(&url).await?;
        Ok(decoded.page)
    }

    async fn fetch_page(&self, url: &str) -> Result<(DecodedPage, u32)> {
        let fetched = self.client.fetch_with_retry(url).await?;
        debug!(
            "Page fetched in {} attempt(s), {} bytes",
            fetched.attempts,
            fetched.body.len()
        );
        let decoded = decode_page(url, &fetched.body)?;
        Ok((decoded, fetched.attempts))
    }
}

fn log_page(page: &PageResponse) {
    info!(
        "API Response - Page: {}, Total Results: {}",
        page.page.map_or_else(|| "?".to_string(), |p| p.to_string()),
        page.total_results
            .map_or_else(|| "?".to_string(), |t| t.to_string())
    );
    info!(
        "API Response - Media items on this page: {} ({} photos)",
        page.media.len(),
        page.photo_count()
    );
    match page.next_page() {
        Some(next) => info!("API Response - Next page URL: {}", next),
        None => info!("API Response - No next page indicated."),
    }
}
