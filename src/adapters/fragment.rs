use crate::domain::ports::Card;
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Parsed-document card source, used for extraction from saved result pages
/// and in tests. No browser involved.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn cards(&self, selector: &str) -> Result<Vec<FragmentCard<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .document
            .select(&selector)
            .map(|node| FragmentCard { node })
            .collect())
    }
}

pub struct FragmentCard<'a> {
    node: ElementRef<'a>,
}

impl Card for FragmentCard<'_> {
    fn find_first(&self, selector: &str) -> Result<Option<Box<dyn Card + '_>>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .node
            .select(&selector)
            .next()
            .map(|node| Box::new(FragmentCard { node }) as Box<dyn Card + '_>))
    }

    fn text(&self) -> Result<String> {
        Ok(self.node.text().collect::<String>())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.node.value().attr(name).map(str::to_string))
    }

    fn is_stale(&self) -> bool {
        false
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::config(format!("Invalid selector '{}': {}", selector, e)))
}
