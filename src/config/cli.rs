use crate::config::{OutputFormat, ScrapeConfig, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vaga-scrape")]
#[command(about = "Scrapes paginated job-board search results into a local dataset")]
pub struct CliConfig {
    /// Search results URL to start from
    #[arg(long)]
    pub url: Option<String>,

    /// TOML configuration file; CLI flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Extract from a saved results page instead of a live browser session
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the effective run configuration: defaults, then the TOML
    /// file when given, then explicit CLI flags on top.
    pub fn resolve(&self) -> Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_scrape_config(),
            None => ScrapeConfig::default(),
        };

        if let Some(url) = &self.url {
            config.start_url = url.clone();
        }
        if let Some(path) = &self.output_path {
            config.output.path = path.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.headed {
            config.browser.headless = Some(false);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "vaga-scrape",
            "--url",
            "https://example.com/jobs",
            "--format",
            "json",
            "--headed",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.start_url, "https://example.com/jobs");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.browser.headless, Some(false));
    }

    #[test]
    fn defaults_used_without_flags() {
        let cli = CliConfig::parse_from(["vaga-scrape"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.start_url.starts_with("https://br.indeed.com/"));
    }
}
