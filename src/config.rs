//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::ebay::Site;
use crate::format::CurrencyFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// eBay site to search
    #[serde(default)]
    pub site: Site,

    /// Finding API application id
    #[serde(default)]
    pub app_id: Option<String>,

    /// Finding API base URL override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// File listing the wanted items
    #[serde(default = "default_search_file")]
    pub search_file: PathBuf,

    /// Where the HTML report is written
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Address the report server binds to
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Pause before each search query in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Random jitter added to the pause (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Money display; defaults to the site's currency
    #[serde(default)]
    pub currency: Option<CurrencyFormat>,
}

fn default_search_file() -> PathBuf {
    PathBuf::from("search.txt")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("templates/list.html")
}

fn default_listen() -> String {
    "0.0.0.0:8887".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: Site::Uk,
            app_id: None,
            endpoint: None,
            search_file: default_search_file(),
            report_path: default_report_path(),
            listen: default_listen(),
            delay_ms: 0,
            delay_jitter_ms: 0,
            currency: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("ebay-watch.toml");
        if local_config.exists() {
            debug!("Found ebay-watch.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ebay-watch").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(site) = std::env::var("EBAY_SITE") {
            if let Ok(s) = site.parse() {
                self.site = s;
            }
        }

        if let Ok(app_id) = std::env::var("EBAY_APP_ID") {
            self.app_id = Some(app_id);
        }

        if let Ok(listen) = std::env::var("EBAY_LISTEN") {
            self.listen = listen;
        }

        if let Ok(delay) = std::env::var("EBAY_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }

    /// Money display in effect: the explicit setting, else the site default.
    pub fn currency_format(&self) -> CurrencyFormat {
        self.currency.clone().unwrap_or_else(|| self.site.currency_format())
    }
}
