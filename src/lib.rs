//! # Pexels Collector
//!
//! Walks a Pexels collection page by page and writes the URL of one size
//! variant of every photo to a plain text file, one URL per line.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pexels_collector::{config::FetcherConfig, engine::CollectionWalker, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = FetcherConfig::load(None)?;
//!     config.validate()?;
//!
//!     let walker = CollectionWalker::from_config(&config)?;
//!     let report = walker.walk_config(&config).await?;
//!     println!("{} URLs", report.urls.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  cli: fetch / check / sizes        config: FetcherConfig │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴─────────────────────────────┐
//! │  engine: CollectionWalker  (one page at a time)          │
//! ├──────────────┬──────────────────┬────────────────────────┤
//! │  http        │  decode          │  pagination            │
//! │  Retry       │  PageResponse    │  next_page link        │
//! │  Backoff     │  Photo variants  │  Page limit            │
//! └──────────────┴──────────────────┴────────────────────────┘
//!                              │
//!                   output: one URL per line
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Runtime configuration
pub mod config;

/// HTTP client with retry
pub mod http;

/// Next-page traversal
pub mod pagination;

/// Page decoding and URL extraction
pub mod decode;

/// Collection walker
pub mod engine;

/// URL list output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use engine::{CollectionWalker, WalkReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
