use crate::utils::error::Result;
use std::time::Duration;

/// Read-only capability over one result card's markup sub-tree.
///
/// Two implementations exist: a live browser element
/// (`adapters::browser::ChromeCard`) and a parsed HTML fragment
/// (`adapters::fragment::FragmentCard`). The extractor is agnostic to which
/// one it is handed. A live handle becomes stale once its owning page is
/// navigated away from; callers must not retain handles across a pagination
/// transition.
pub trait Card {
    /// First descendant matching `selector`, or `None` when nothing matches.
    fn find_first(&self, selector: &str) -> Result<Option<Box<dyn Card + '_>>>;

    /// Visible text content of this node.
    fn text(&self) -> Result<String>;

    /// Attribute value, `None` when the attribute is not present.
    fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether the underlying handle has been detached from its page.
    /// Parsed fragments are never stale.
    fn is_stale(&self) -> bool;
}

/// One browser session for the whole run, sequential use only. Every wait
/// takes an explicit upper bound; implementations must never block past it.
pub trait Session {
    fn navigate(&self, url: &str) -> Result<()>;

    /// Waits until at least one element matches `selector`. `Ok(false)` on
    /// timeout; the caller decides whether that ends the run.
    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Snapshot of all elements currently matching `selector`, in document
    /// order. An empty page yields an empty vec, not an error.
    fn find_cards(&self, selector: &str) -> Result<Vec<Box<dyn Card + '_>>>;

    fn wait_until_visible(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Enabled/active state of the first match. Disabled controls must not
    /// be clicked.
    fn is_enabled(&self, selector: &str) -> Result<bool>;

    fn wait_until_clickable(&self, selector: &str, timeout: Duration) -> Result<bool>;

    fn click(&self, selector: &str) -> Result<()>;
}

/// Creates the session used for a run. Platform specifics (binary paths,
/// headless mode, sandbox flags) are resolved here, once, at startup.
pub trait SessionFactory {
    fn create(&self) -> Result<Box<dyn Session>>;
}
