use anyhow::Context;
use clap::Parser;
use vaga_scrape::adapters::browser::ChromeSessionFactory;
use vaga_scrape::adapters::fragment::HtmlPage;
use vaga_scrape::adapters::output;
use vaga_scrape::core::extractor::RecordExtractor;
use vaga_scrape::utils::{logger, validation::Validate};
use vaga_scrape::{CliConfig, JobRecord, ScrapeConfig, ScrapeOrchestrator, SessionFactory};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting vaga-scrape");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let records = match &cli.html_file {
        Some(path) => extract_from_file(path, &config)?,
        None => scrape_live(&config)?,
    };

    let output_path = output::write_records(&config.output, &records)?;
    tracing::info!("✅ Scrape completed: {} records", records.len());
    println!("✅ {} records saved to {}", records.len(), output_path.display());

    Ok(())
}

fn scrape_live(config: &ScrapeConfig) -> anyhow::Result<Vec<JobRecord>> {
    let factory = ChromeSessionFactory::new(config.browser.clone());
    let session = factory
        .create()
        .context("Failed to create browser session")?;

    let mut orchestrator = ScrapeOrchestrator::new(session.as_ref(), config);
    let records = orchestrator.run().context("Scrape run failed")?;
    // Session dropped here, closing the browser on every exit path.
    Ok(records)
}

/// Offline path: extract from a saved results page, single page, no
/// pagination. Useful for selector debugging without a browser.
fn extract_from_file(
    path: &std::path::Path,
    config: &ScrapeConfig,
) -> anyhow::Result<Vec<JobRecord>> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read HTML file {}", path.display()))?;
    let page = HtmlPage::parse(&html);
    let cards = page.cards(&config.selectors.job_card)?;
    tracing::info!("Number of cards found: {}", cards.len());

    let extractor = RecordExtractor::new(&config.selectors, &config.viewer_url_template);
    Ok(cards
        .iter()
        .filter_map(|card| extractor.extract(card))
        .collect())
}
