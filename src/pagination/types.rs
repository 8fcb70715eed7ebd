//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by the walker.

use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this absolute URL next
    Continue { url: String },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }

    /// URL to fetch next, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Continue { url } => Some(url),
            Self::Done => None,
        }
    }
}

/// Tracks pagination state during a walk
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages processed so far
    pub pages: u32,
    /// Media items seen so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Count a processed page
    pub fn next_page(&mut self) {
        self.pages += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Process a page body and decide whether another page follows
    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Extract a string from a dot-separated path (`$.` prefix optional)
///
/// Returns `None` for missing fields, `null`, and non-string values.
pub fn extract_path(value: &Value, path: &str) -> Option<String> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        current = current.as_object()?.get(part)?;
    }

    current.as_str().map(str::to_string)
}
