use serde::{Deserialize, Serialize};

/// One extracted job posting. Built once per card during a page's extraction
/// pass, appended to the run's accumulator and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRecord {
    /// Identifier token read off the card's anchor. Present whenever the
    /// anchor carries the attribute, even if its value is blank.
    pub source_id: Option<String>,
    pub title: String,
    /// Viewer URL derived from `source_id` via the configured template.
    /// Empty when `source_id` is absent.
    pub url: String,
    pub company: String,
    pub location: String,
    /// Wall-clock capture time in America/Sao_Paulo, `YYYY-MM-DD HH:MM:SS`.
    pub captured_at: String,
}
