use crate::config::BrowserConfig;
use crate::domain::ports::{Card, Session, SessionFactory};
use crate::utils::error::{Result, ScrapeError};
use headless_chrome::{Browser, Element, LaunchOptionsBuilder, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

const CLICKABLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches Chrome with the platform defaults the scraper has always used:
/// headed on Windows, headless with an explicit binary path elsewhere.
pub struct ChromeSessionFactory {
    config: BrowserConfig,
}

impl ChromeSessionFactory {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for ChromeSessionFactory {
    fn create(&self) -> Result<Box<dyn Session>> {
        let headless = self.config.headless.unwrap_or(!cfg!(target_os = "windows"));
        let binary = self.config.binary_path.clone().or_else(default_binary_path);
        if let Some(path) = &binary {
            tracing::info!("Using Chrome binary at: {}", path.display());
        }

        let args: Vec<&OsStr> = vec![OsStr::new("--disable-dev-shm-usage")];
        let options = LaunchOptionsBuilder::default()
            .headless(headless)
            .sandbox(self.config.sandbox)
            .path(binary)
            .args(args)
            .build()
            .map_err(ScrapeError::session)?;

        let browser = Browser::new(options).map_err(ScrapeError::session)?;
        let tab = browser.new_tab().map_err(ScrapeError::session)?;
        tab.set_user_agent(&self.config.user_agent, None, None)
            .map_err(ScrapeError::session)?;

        Ok(Box::new(ChromeSession {
            _browser: browser,
            tab,
        }))
    }
}

fn default_binary_path() -> Option<PathBuf> {
    let candidate = if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome")
    } else if cfg!(target_os = "windows") {
        // headless_chrome locates the installed binary itself on Windows.
        return None;
    } else {
        PathBuf::from("/usr/bin/google-chrome")
    };
    candidate.exists().then_some(candidate)
}

/// Live browser session. Dropping it shuts the Chrome process down, which is
/// how the session resource is released on every exit path.
pub struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl Session for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(ScrapeError::session)?;
        self.tab.wait_until_navigated().map_err(ScrapeError::session)?;
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<bool> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::debug!("No element {} within {:?}: {}", selector, timeout, e);
                Ok(false)
            }
        }
    }

    fn find_cards(&self, selector: &str) -> Result<Vec<Box<dyn Card + '_>>> {
        // The engine reports "no matches" as an error; the port treats an
        // empty page as an empty snapshot.
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(elements
                .into_iter()
                .map(|element| Box::new(ChromeCard { element }) as Box<dyn Card + '_>)
                .collect()),
            Err(_) => Ok(Vec::new()),
        }
    }

    fn wait_until_visible(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let element = match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(element) => element,
            Err(_) => return Ok(false),
        };
        Ok(element.get_box_model().is_ok())
    }

    fn is_enabled(&self, selector: &str) -> Result<bool> {
        let element = self.tab.find_element(selector).map_err(ScrapeError::session)?;
        let disabled = element
            .get_attribute_value("disabled")
            .map_err(ScrapeError::session)?;
        let aria_disabled = element
            .get_attribute_value("aria-disabled")
            .map_err(ScrapeError::session)?;
        Ok(disabled.is_none() && aria_disabled.as_deref() != Some("true"))
    }

    fn wait_until_clickable(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.tab.find_element(selector) {
                if element.scroll_into_view().is_ok() && element.get_box_model().is_ok() {
                    return Ok(true);
                }
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(CLICKABLE_POLL_INTERVAL);
        }
    }

    fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .map_err(ScrapeError::session)?
            .click()
            .map_err(ScrapeError::session)?;
        Ok(())
    }
}

pub struct ChromeCard<'a> {
    element: Element<'a>,
}

impl Card for ChromeCard<'_> {
    fn find_first(&self, selector: &str) -> Result<Option<Box<dyn Card + '_>>> {
        match self.element.find_element(selector) {
            Ok(element) => Ok(Some(Box::new(ChromeCard { element }) as Box<dyn Card + '_>)),
            Err(_) => Ok(None),
        }
    }

    fn text(&self) -> Result<String> {
        self.element.get_inner_text().map_err(ScrapeError::session)
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.element
            .get_attribute_value(name)
            .map_err(ScrapeError::session)
    }

    fn is_stale(&self) -> bool {
        // A detached node no longer answers layout queries.
        self.element.get_box_model().is_err()
    }
}
