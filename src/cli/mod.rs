//! CLI module
//!
//! Command-line interface for the collector.
//!
//! # Commands
//!
//! - `fetch` - Walk a collection and write its photo URLs
//! - `check` - Verify the API key and collection with a one-item request
//! - `sizes` - List the photo size variants

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchArgs};
pub use runner::{fetch_collection, persist, FetchOutcome, Runner};
