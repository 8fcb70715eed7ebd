//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FetchArgs};
use crate::config::FetcherConfig;
use crate::engine::{CollectionWalker, WalkReport};
use crate::error::Result;
use crate::output::UrlFileWriter;
use crate::types::PhotoSize;
use tracing::info;

/// Result of a fetch run
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub report: WalkReport,
    /// Lines written, `None` when nothing was collected and no file was touched
    pub written: Option<usize>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch(args) => self.fetch(args).await,
            Commands::Check { collection } => self.check(collection.as_deref()).await,
            Commands::Sizes => {
                Self::sizes();
                Ok(())
            }
        }
    }

    /// Load configuration from the file, `.env` and environment
    fn load_config(&self) -> Result<FetcherConfig> {
        FetcherConfig::load(self.cli.config.as_deref())
    }

    async fn fetch(&self, args: &FetchArgs) -> Result<()> {
        let mut config = self.load_config()?;
        args.apply(&mut config);

        let outcome = fetch_collection(&config).await?;
        if let Some(written) = outcome.written {
            info!("Successfully fetched {} photo URLs.", written);
        }
        Ok(())
    }

    async fn check(&self, collection: Option<&str>) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(id) = collection {
            config.collection_id = id.to_string();
        }
        config.validate()?;

        let walker = CollectionWalker::from_config(&config)?;
        let page = walker.probe(&config.collection_id).await?;

        println!(
            "Collection {}: {} media item(s)",
            config.collection_id,
            page.total_results
                .map_or_else(|| "unknown".to_string(), |t| t.to_string())
        );
        Ok(())
    }

    fn sizes() {
        for size in PhotoSize::ALL {
            println!("{size}");
        }
    }
}

/// Validate `config`, walk the collection, and persist the URLs
///
/// Nothing is written when the walk fails or collects no URLs.
pub async fn fetch_collection(config: &FetcherConfig) -> Result<FetchOutcome> {
    config.validate()?;
    info!("Using API Key ending with: {}", config.masked_api_key());

    let walker = CollectionWalker::from_config(config)?;
    let report = walker.walk_config(config).await?;

    let written = persist(&report, &UrlFileWriter::new(&config.output_path))?;
    Ok(FetchOutcome { report, written })
}

/// Write the report's URLs, skipping the write for an empty list
pub fn persist(report: &WalkReport, writer: &UrlFileWriter) -> Result<Option<usize>> {
    if report.is_empty() {
        info!("No photo URLs were fetched.");
        return Ok(None);
    }

    let written = writer.write(&report.urls)?;
    info!("Saved {} URLs to: {}", written, writer.target());
    Ok(Some(written))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_skips_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "previous\n").unwrap();

        let written = persist(&WalkReport::default(), &UrlFileWriter::new(&path)).unwrap();

        assert_eq!(written, None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous\n");
    }

    #[test]
    fn test_persist_writes_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        let report = WalkReport {
            urls: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };

        let written = persist(&report, &UrlFileWriter::new(&path)).unwrap();

        assert_eq!(written, Some(2));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[tokio::test]
    async fn test_fetch_collection_requires_api_key() {
        let err = fetch_collection(&FetcherConfig::default())
            .await
            .unwrap_err();
        assert!(err.is_config());
    }
}
