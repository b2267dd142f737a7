//! Serve command: refresh the report, then publish it over HTTP.

use super::GenerateCommand;
use crate::config::Config;
use crate::publish::ReportStore;
use crate::server;
use anyhow::Result;
use tracing::{info, warn};

/// Which artifact is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Generated by this invocation.
    Fresh,
    /// Left over from an earlier run because generation failed.
    Stale,
}

/// Decides what to serve after a generation attempt. A failed run falls back
/// to the artifact already on disk; with nothing on disk the error stands.
pub fn fallback<T>(generated: Result<T>, store: &ReportStore) -> Result<ReportStatus> {
    match generated {
        Ok(_) => Ok(ReportStatus::Fresh),
        Err(e) if store.exists() => {
            warn!("Generation failed, serving previous report: {:#}", e);
            Ok(ReportStatus::Stale)
        }
        Err(e) => Err(e),
    }
}

pub struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generates once, then serves until interrupted.
    pub async fn execute(self) -> Result<()> {
        let store = ReportStore::new(&self.config.report_path);
        let generated = GenerateCommand::new(self.config.clone()).execute().await;

        let status = fallback(generated, &store)?;
        info!("Report status: {:?}", status);

        server::serve(&self.config.listen, store).await
    }
}
