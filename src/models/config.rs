//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Catalog output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Listing sites to scrape
    #[serde(default = "defaults::sites")]
    pub sites: Vec<SiteConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::config("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::config("scraper.timeout_secs must be > 0"));
        }
        if self.output.file.trim().is_empty() {
            return Err(AppError::config("output.file is empty"));
        }
        if self.sites.is_empty() {
            return Err(AppError::config("No sites defined"));
        }
        for site in &self.sites {
            if site.url.trim().is_empty() {
                return Err(AppError::config("Site with empty url"));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            output: OutputConfig::default(),
            sites: defaults::sites(),
        }
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between site requests in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: 0,
        }
    }
}

/// Catalog output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the persisted catalog file
    #[serde(default = "defaults::output_file")]
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: defaults::output_file(),
        }
    }
}

/// One listing site to scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// URL of the listing page
    pub url: String,

    /// CSS selector matching one listing row per server
    #[serde(default = "defaults::row_selector")]
    pub row_selector: String,

    /// Per-site request timeout override in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl SiteConfig {
    /// Site identifier used in diagnostics.
    pub fn name(&self) -> &str {
        self.url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }
}

mod defaults {
    use super::SiteConfig;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn output_file() -> String {
        "data/servers.json".into()
    }
    pub fn row_selector() -> String {
        "div.server-card, div.server-item".into()
    }

    /// Known Hytale listing sites.
    pub fn sites() -> Vec<SiteConfig> {
        [
            "https://hytaleserverlist.me",
            "https://hytaleservers.org",
            "https://hytaleserver.com",
            "https://hytale-servers.com",
            "https://hytaletop100.com",
            "https://hytalelobby.com",
            "https://hytalemenu.com",
            "https://hytale-universe.com",
            "https://hytale-serverlist.com",
            "https://top-games.net",
            "https://hytale.game/en/servers/",
            "https://hytaleonlineservers.com",
        ]
        .into_iter()
        .map(|url| SiteConfig {
            url: url.to_string(),
            row_selector: row_selector(),
            timeout_secs: None,
        })
        .collect()
    }
}
