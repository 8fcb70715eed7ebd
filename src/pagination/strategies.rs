//! Pagination strategy implementations

use super::types::{extract_path, NextPage, PaginationState, Paginator};
use serde_json::Value;
use tracing::info;

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Next URL pagination (URL in response body)
///
/// Follows a server-issued link such as
/// `{ "next_page": "https://api.pexels.com/v1/collections/abc?page=2" }`.
/// The link is trusted as-is; pages are never revisited by the walker, but
/// no cycle detection is attempted.
#[derive(Debug, Clone)]
pub struct NextUrlPaginator {
    /// Path to the next URL in the response
    pub path: String,
}

impl Default for NextUrlPaginator {
    fn default() -> Self {
        Self::new("next_page")
    }
}

impl NextUrlPaginator {
    /// Create a new next URL paginator
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Paginator for NextUrlPaginator {
    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.next_page();

        if let Some(next_url) = extract_path(body, &self.path) {
            if !next_url.trim().is_empty() {
                return NextPage::with_url(next_url);
            }
        }

        state.mark_done();
        NextPage::Done
    }
}

// ============================================================================
// Page Limit
// ============================================================================

/// Stops another paginator after a fixed number of pages
#[derive(Debug, Clone)]
pub struct PageLimit<P> {
    inner: P,
    max_pages: u32,
}

impl<P: Paginator> PageLimit<P> {
    /// Wrap `inner`, allowing at most `max_pages` pages
    pub fn new(inner: P, max_pages: u32) -> Self {
        Self { inner, max_pages }
    }
}

impl<P: Paginator> Paginator for PageLimit<P> {
    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        let next = self.inner.process_response(body, records_count, state);
        if next.is_continue() && state.pages >= self.max_pages {
            info!("Page limit of {} reached, stopping", self.max_pages);
            state.mark_done();
            return NextPage::Done;
        }
        next
    }
}
