//! Generate command: run every search once and write the report.

use crate::config::Config;
use crate::directive::{parse_document, SearchDirective};
use crate::ebay::{EbayClient, EbaySearch};
use crate::format::RowFormatter;
use crate::pipeline::{self, Clock, SystemClock};
use crate::publish::ReportStore;
use crate::report::Report;
use anyhow::{Context, Result};
use tracing::info;

/// Runs the watch list and replaces the report artifact.
pub struct GenerateCommand {
    config: Config,
}

impl GenerateCommand {
    /// Creates a new generate command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads and parses the search file. A malformed line fails the whole file.
    pub fn load_directives(&self) -> Result<Vec<SearchDirective>> {
        let path = &self.config.search_file;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search file: {}", path.display()))?;

        let directives = parse_document(&text)
            .with_context(|| format!("Invalid search file: {}", path.display()))?;
        info!("Loaded {} searches from {}", directives.len(), path.display());
        Ok(directives)
    }

    /// Executes against the live Finding API.
    pub async fn execute(&self) -> Result<Report> {
        let directives = self.load_directives()?;
        let client = EbayClient::new(&self.config).context("Failed to create eBay client")?;
        self.run(&client, &directives, &SystemClock).await
    }

    /// Executes with a provided client and clock (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl EbaySearch,
        clock: &impl Clock,
    ) -> Result<Report> {
        let directives = self.load_directives()?;
        self.run(client, &directives, clock).await
    }

    /// The artifact is only written once every search has succeeded.
    async fn run(
        &self,
        client: &impl EbaySearch,
        directives: &[SearchDirective],
        clock: &impl Clock,
    ) -> Result<Report> {
        let formatter = RowFormatter::new(self.config.currency_format());
        let report = pipeline::run(client, directives, &formatter, clock)
            .await
            .context("Search run failed; report left unchanged")?;

        ReportStore::new(&self.config.report_path)
            .write(&report.render_document())
            .await
            .context("Failed to write report")?;

        Ok(report)
    }
}
