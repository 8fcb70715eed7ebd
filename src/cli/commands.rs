//! CLI commands and argument parsing

use crate::config::FetcherConfig;
use crate::types::PhotoSize;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Collect photo URLs from a Pexels collection
#[derive(Parser, Debug)]
#[command(name = "pexels-collector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a collection and write its photo URLs
    Fetch(FetchArgs),

    /// Fetch a single item to verify the API key and collection
    Check {
        /// Collection ID
        #[arg(long)]
        collection: Option<String>,
    },

    /// List the photo size variants
    Sizes,
}

/// Overrides for a fetch run; unset flags keep the configured value
#[derive(Args, Debug, Default, Clone)]
pub struct FetchArgs {
    /// Collection ID
    #[arg(long)]
    pub collection: Option<String>,

    /// Size variant to extract
    #[arg(short, long, value_enum)]
    pub size: Option<PhotoSize>,

    /// Items per page (1-80)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Output file (`-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Attempts per page, including the first
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Base retry delay in milliseconds
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Ask the API for photos only
    #[arg(long, overrides_with = "no_photos_only")]
    pub photos_only: bool,

    /// Request all media kinds, overriding a configured `photos_only`
    #[arg(long, overrides_with = "photos_only")]
    pub no_photos_only: bool,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Pause between pages in milliseconds
    #[arg(long)]
    pub page_delay_ms: Option<u64>,
}

impl FetchArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut FetcherConfig) {
        if let Some(collection) = &self.collection {
            config.collection_id.clone_from(collection);
        }
        if let Some(size) = self.size {
            config.photo_size = size;
        }
        if let Some(per_page) = self.per_page {
            config.per_page = per_page;
        }
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(attempts) = self.max_attempts {
            config.retry.max_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retry.base_delay_ms = delay;
        }
        if let Some(timeout) = self.timeout_secs {
            config.retry.timeout_secs = timeout;
        }
        if self.photos_only {
            config.photos_only = true;
        } else if self.no_photos_only {
            config.photos_only = false;
        }
        if let Some(max) = self.max_pages {
            config.max_pages = Some(max);
        }
        if let Some(delay) = self.page_delay_ms {
            config.page_delay_ms = delay;
        }
    }
}
