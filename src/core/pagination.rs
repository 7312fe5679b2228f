use crate::config::Timeouts;
use crate::domain::ports::{Card, Session};
use crate::utils::error::Result;
use std::time::{Duration, Instant};

const STALENESS_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAdvance {
    Advanced,
    NoMorePages,
}

/// Tries to move the session to the next results page.
///
/// The next-control must be visible, independently confirmed enabled and
/// independently confirmed clickable before a click is attempted; any single
/// check failing ends pagination. Unexpected session errors are absorbed and
/// end collection with whatever was gathered, never the process.
pub fn advance(
    session: &dyn Session,
    next_selector: &str,
    first_card: Option<&dyn Card>,
    timeouts: &Timeouts,
) -> PageAdvance {
    match try_advance(session, next_selector, first_card, timeouts) {
        Ok(advance) => advance,
        Err(e) => {
            tracing::warn!("Pagination failed, ending collection: {}", e);
            PageAdvance::NoMorePages
        }
    }
}

fn try_advance(
    session: &dyn Session,
    next_selector: &str,
    first_card: Option<&dyn Card>,
    timeouts: &Timeouts,
) -> Result<PageAdvance> {
    if !session.wait_until_visible(next_selector, timeouts.pagination())? {
        tracing::info!("Next-page control not found, last page reached");
        return Ok(PageAdvance::NoMorePages);
    }

    if !session.is_enabled(next_selector)? {
        tracing::info!("Next-page control disabled, last page reached");
        return Ok(PageAdvance::NoMorePages);
    }

    if !session.wait_until_clickable(next_selector, timeouts.pagination())? {
        tracing::info!("Next-page control never became clickable, stopping");
        return Ok(PageAdvance::NoMorePages);
    }

    session.click(next_selector)?;

    // Detachment of the old first card signals the transition has begun.
    // Some transitions never invalidate the observed handle, so a timeout
    // here is success with a warning, not a failure.
    if let Some(card) = first_card {
        if !wait_for_detach(card, timeouts.staleness()) {
            tracing::warn!("Old page handle never went stale, assuming transition completed");
        }
    }

    Ok(PageAdvance::Advanced)
}

fn wait_for_detach(card: &dyn Card, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if card.is_stale() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(STALENESS_POLL_INTERVAL);
    }
}
