use crate::config::ScrapeConfig;
use crate::core::extractor::RecordExtractor;
use crate::core::pagination::{self, PageAdvance};
use crate::core::sync::{self, SyncOutcome};
use crate::domain::model::JobRecord;
use crate::domain::ports::Session;
use crate::utils::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop signal, checked between pages. Cancelling never discards
/// records already harvested.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives the scrape loop:
/// navigate → dismiss overlay → wait for cards → extract → paginate → repeat.
///
/// Owns the accumulator for the whole run. Card handles are re-fetched on
/// every iteration and never survive a page transition; `page_generation`
/// counts successful transitions.
pub struct ScrapeOrchestrator<'a> {
    session: &'a dyn Session,
    config: &'a ScrapeConfig,
    extractor: RecordExtractor,
    cancel: CancelFlag,
    page_generation: u64,
}

impl<'a> ScrapeOrchestrator<'a> {
    pub fn new(session: &'a dyn Session, config: &'a ScrapeConfig) -> Self {
        Self {
            session,
            config,
            extractor: RecordExtractor::new(&config.selectors, &config.viewer_url_template),
            cancel: CancelFlag::new(),
            page_generation: 0,
        }
    }

    /// Handle for stopping the run between pages from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Pages visited beyond the first.
    pub fn page_generation(&self) -> u64 {
        self.page_generation
    }

    /// Runs the loop to completion and returns the accumulator. The only
    /// error path is the initial navigation; everything after that
    /// terminates cleanly with the records gathered so far.
    pub fn run(&mut self) -> Result<Vec<JobRecord>> {
        let mut records = Vec::new();

        tracing::info!("Navigating to {}", self.config.start_url);
        self.session.navigate(&self.config.start_url)?;

        sync::dismiss_overlay(
            self.session,
            &self.config.selectors.overlay_dismiss,
            self.config.timeouts.overlay(),
        );

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!("Cancellation requested, stopping after page {}", self.page_generation);
                break;
            }

            let outcome = sync::wait_for_cards(
                self.session,
                &self.config.selectors.job_card,
                self.config.timeouts.wait_cards(),
            );
            if outcome == SyncOutcome::TimedOut {
                break;
            }

            // Snapshot of the cards present right now; later arrivals on the
            // same page are not revisited.
            let cards = match self.session.find_cards(&self.config.selectors.job_card) {
                Ok(cards) => cards,
                Err(e) => {
                    tracing::warn!("Card enumeration failed, ending collection: {}", e);
                    break;
                }
            };
            tracing::info!(
                "Number of cards found: {} (page {})",
                cards.len(),
                self.page_generation + 1
            );

            for card in &cards {
                if let Some(record) = self.extractor.extract(card.as_ref()) {
                    records.push(record);
                }
            }

            let advance = pagination::advance(
                self.session,
                &self.config.selectors.next_page,
                cards.first().map(|c| c.as_ref()),
                &self.config.timeouts,
            );
            match advance {
                PageAdvance::Advanced => {
                    self.page_generation += 1;
                }
                PageAdvance::NoMorePages => break,
            }
        }

        tracing::info!(
            "Run finished: {} records across {} page(s)",
            records.len(),
            self.page_generation + 1
        );
        Ok(records)
    }
}
