use crate::config::Selectors;
use crate::domain::model::JobRecord;
use crate::domain::ports::Card;
use chrono::Utc;
use chrono_tz::America::Sao_Paulo;

/// Anchor carrying the job identifier. Fixed markup contract of the source
/// site, not configurable.
const ANCHOR_SELECTOR: &str = "a";
const ID_ATTRIBUTE: &str = "data-jk";

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maps one card to at most one record. Pure function of the card and the
/// clock; never navigates, never touches the network.
pub struct RecordExtractor {
    company_selector: String,
    location_selector: String,
    url_template: String,
}

impl RecordExtractor {
    pub fn new(selectors: &Selectors, url_template: &str) -> Self {
        Self {
            company_selector: selectors.company.clone(),
            location_selector: selectors.location.clone(),
            url_template: url_template.to_string(),
        }
    }

    /// Extracts a record, stamping it with the current Sao Paulo time.
    pub fn extract(&self, card: &dyn Card) -> Option<JobRecord> {
        self.extract_at(card, &sao_paulo_now())
    }

    /// A card without the identifying anchor yields no record at all; a
    /// missing company or location degrades to an empty string without
    /// touching the other fields.
    pub fn extract_at(&self, card: &dyn Card, captured_at: &str) -> Option<JobRecord> {
        let anchor = match card.find_first(ANCHOR_SELECTOR) {
            Ok(Some(anchor)) => anchor,
            Ok(None) => {
                tracing::debug!("Skipping card without identifying anchor");
                return None;
            }
            Err(e) => {
                tracing::debug!("Skipping card, anchor lookup failed: {}", e);
                return None;
            }
        };

        // The attribute value is passed through unmodified, blank included.
        let source_id = anchor.attribute(ID_ATTRIBUTE).ok().flatten();
        let title = anchor.text().map(|t| t.trim().to_string()).unwrap_or_default();
        let url = match &source_id {
            Some(id) => self.url_template.replacen("{}", id, 1),
            None => String::new(),
        };

        Some(JobRecord {
            source_id,
            title,
            url,
            company: self.descendant_text(card, &self.company_selector),
            location: self.descendant_text(card, &self.location_selector),
            captured_at: captured_at.to_string(),
        })
    }

    fn descendant_text(&self, card: &dyn Card, selector: &str) -> String {
        match card.find_first(selector) {
            Ok(Some(element)) => element.text().unwrap_or_default().trim().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::debug!("Sub-field lookup failed for {}: {}", selector, e);
                String::new()
            }
        }
    }
}

/// Current wall-clock time in the reference timezone of the source site.
pub fn sao_paulo_now() -> String {
    Utc::now()
        .with_timezone(&Sao_Paulo)
        .format(DATE_TIME_FORMAT)
        .to_string()
}
