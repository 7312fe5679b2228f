use crate::config::{BrowserConfig, OutputConfig, ScrapeConfig, Selectors, Timeouts};
use crate::utils::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration. Every section is optional; omitted sections fall
/// back to the built-in defaults so a file only needs to state what differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub scrape: Option<ScrapeSection>,
    pub selectors: Option<Selectors>,
    pub timeouts: Option<Timeouts>,
    pub browser: Option<BrowserConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSection {
    pub start_url: Option<String>,
    pub viewer_url_template: Option<String>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScrapeError::config(format!("Invalid TOML configuration: {}", e)))
    }

    pub fn into_scrape_config(self) -> ScrapeConfig {
        let mut config = ScrapeConfig::default();

        if let Some(scrape) = self.scrape {
            if let Some(start_url) = scrape.start_url {
                config.start_url = start_url;
            }
            if let Some(template) = scrape.viewer_url_template {
                config.viewer_url_template = template;
            }
        }
        if let Some(selectors) = self.selectors {
            config.selectors = selectors;
        }
        if let Some(timeouts) = self.timeouts {
            config.timeouts = timeouts;
        }
        if let Some(browser) = self.browser {
            config.browser = browser;
        }
        if let Some(output) = self.output {
            config.output = output;
        }

        config
    }
}
