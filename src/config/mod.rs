pub mod cli;
pub mod toml_config;

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, validate_url_template,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.6613.137 Safari/537.36";

/// Fully resolved run configuration, passed explicitly into the orchestrator.
/// Built from CLI flags, a TOML file, or both; validated once at startup.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub start_url: String,
    pub viewer_url_template: String,
    pub selectors: Selectors,
    pub timeouts: Timeouts,
    pub browser: BrowserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub job_card: String,
    pub company: String,
    pub location: String,
    pub next_page: String,
    pub overlay_dismiss: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            job_card: "div.job_seen_beacon".to_string(),
            company: r#"span[data-testid="company-name"]"#.to_string(),
            location: r#"div[data-testid="text-location"]"#.to_string(),
            next_page: r#"a[data-testid="pagination-page-next"]"#.to_string(),
            overlay_dismiss: "#onetrust-accept-btn-handler".to_string(),
        }
    }
}

/// Upper bounds for every wait in the loop. No unbounded waits exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub wait_cards_secs: u64,
    pub overlay_secs: u64,
    pub pagination_secs: u64,
    pub staleness_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            wait_cards_secs: 10,
            overlay_secs: 3,
            pagination_secs: 5,
            staleness_secs: 5,
        }
    }
}

impl Timeouts {
    pub fn wait_cards(&self) -> Duration {
        Duration::from_secs(self.wait_cards_secs)
    }

    pub fn overlay(&self) -> Duration {
        Duration::from_secs(self.overlay_secs)
    }

    pub fn pagination(&self) -> Duration {
        Duration::from_secs(self.pagination_secs)
    }

    pub fn staleness(&self) -> Duration {
        Duration::from_secs(self.staleness_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// `None` means the platform default: headed on Windows, headless
    /// elsewhere.
    pub headless: Option<bool>,
    /// Explicit Chrome binary path; `None` resolves a platform default.
    pub binary_path: Option<PathBuf>,
    pub user_agent: String,
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: None,
            binary_path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sandbox: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub format: OutputFormat,
    /// Output filename without extension.
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
            format: OutputFormat::Csv,
            filename: "vagas".to_string(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            start_url: "https://br.indeed.com/jobs?q=desenvolvedor+python&l=Remoto&fromage=1"
                .to_string(),
            viewer_url_template: "https://br.indeed.com/viewjob?jk={}".to_string(),
            selectors: Selectors::default(),
            timeouts: Timeouts::default(),
            browser: BrowserConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        validate_url("start_url", &self.start_url)?;
        validate_url_template("viewer_url_template", &self.viewer_url_template)?;

        validate_non_empty_string("selectors.job_card", &self.selectors.job_card)?;
        validate_non_empty_string("selectors.company", &self.selectors.company)?;
        validate_non_empty_string("selectors.location", &self.selectors.location)?;
        validate_non_empty_string("selectors.next_page", &self.selectors.next_page)?;
        validate_non_empty_string("selectors.overlay_dismiss", &self.selectors.overlay_dismiss)?;

        validate_positive_number("timeouts.wait_cards_secs", self.timeouts.wait_cards_secs, 1)?;
        validate_positive_number("timeouts.overlay_secs", self.timeouts.overlay_secs, 1)?;
        validate_positive_number("timeouts.pagination_secs", self.timeouts.pagination_secs, 1)?;
        validate_positive_number("timeouts.staleness_secs", self.timeouts.staleness_secs, 1)?;

        validate_non_empty_string("output.path", &self.output.path)?;
        validate_non_empty_string("output.filename", &self.output.filename)?;

        Ok(())
    }
}
