use crate::domain::ports::Session;
use std::time::Duration;

/// Outcome of a bounded wait for page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Ready,
    TimedOut,
}

/// Blocks until at least one card is present or `timeout` elapses. A session
/// error during the wait counts as a timeout; the loop ends gracefully either
/// way.
pub fn wait_for_cards(session: &dyn Session, selector: &str, timeout: Duration) -> SyncOutcome {
    match session.wait_for_element(selector, timeout) {
        Ok(true) => SyncOutcome::Ready,
        Ok(false) => {
            tracing::warn!("No cards appeared within {:?} for {}", timeout, selector);
            SyncOutcome::TimedOut
        }
        Err(e) => {
            tracing::warn!("Wait for cards failed: {}", e);
            SyncOutcome::TimedOut
        }
    }
}

/// Best-effort dismissal of a transient overlay such as a consent banner.
/// Absence, timeout and click failure are all normal outcomes; the scrape
/// proceeds identically with or without the overlay.
pub fn dismiss_overlay(session: &dyn Session, selector: &str, timeout: Duration) {
    match session.wait_for_element(selector, timeout) {
        Ok(true) => match session.click(selector) {
            Ok(()) => tracing::debug!("Dismissed overlay {}", selector),
            Err(e) => tracing::debug!("Overlay click failed, continuing: {}", e),
        },
        Ok(false) => tracing::debug!("No overlay {} within {:?}", selector, timeout),
        Err(e) => tracing::debug!("Overlay lookup failed, continuing: {}", e),
    }
}
