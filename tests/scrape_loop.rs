//! End-to-end tests of the scrape loop against an in-memory session.
//! No browser is involved; the fake honors the same port contract.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use vaga_scrape::utils::error::{Result, ScrapeError};
use vaga_scrape::{Card, ScrapeConfig, ScrapeOrchestrator, Session};

// ---------------------------------------------------------------------------
// Fake card tree

#[derive(Clone, Default)]
struct FakeCard {
    /// `None` models a card without the identifying anchor.
    anchor: Option<FakeNode>,
    company: Option<String>,
    location: Option<String>,
    stale: Arc<AtomicBool>,
}

#[derive(Clone, Default)]
struct FakeNode {
    text: String,
    attrs: HashMap<String, String>,
}

impl FakeCard {
    fn full(id: &str, title: &str, company: &str, location: &str) -> Self {
        let mut attrs = HashMap::new();
        attrs.insert("data-jk".to_string(), id.to_string());
        Self {
            anchor: Some(FakeNode {
                text: title.to_string(),
                attrs,
            }),
            company: Some(company.to_string()),
            location: Some(location.to_string()),
            stale: Arc::default(),
        }
    }

    fn without_anchor() -> Self {
        Self::default()
    }
}

impl Card for FakeNode {
    fn find_first(&self, _selector: &str) -> Result<Option<Box<dyn Card + '_>>> {
        Ok(None)
    }

    fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attrs.get(name).cloned())
    }

    fn is_stale(&self) -> bool {
        false
    }
}

impl Card for FakeCard {
    fn find_first(&self, selector: &str) -> Result<Option<Box<dyn Card + '_>>> {
        let defaults = ScrapeConfig::default().selectors;
        let node = if selector == "a" {
            self.anchor.clone()
        } else if selector == defaults.company {
            self.company.as_ref().map(|text| FakeNode {
                text: text.clone(),
                attrs: HashMap::new(),
            })
        } else if selector == defaults.location {
            self.location.as_ref().map(|text| FakeNode {
                text: text.clone(),
                attrs: HashMap::new(),
            })
        } else {
            None
        };
        Ok(node.map(|n| Box::new(n) as Box<dyn Card + '_>))
    }

    fn text(&self) -> Result<String> {
        Ok(String::new())
    }

    fn attribute(&self, _name: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Fake session

#[derive(Clone, Copy)]
struct NextControl {
    enabled: bool,
    clickable: bool,
}

impl NextControl {
    fn enabled() -> Self {
        Self {
            enabled: true,
            clickable: true,
        }
    }

    fn disabled() -> Self {
        Self {
            enabled: false,
            clickable: false,
        }
    }
}

struct FakePage {
    cards: Vec<FakeCard>,
    next: Option<NextControl>,
}

#[derive(Default)]
struct FakeSession {
    pages: Vec<FakePage>,
    current: Cell<usize>,
    overlay_present: bool,
    fail_next_click: bool,
    navigations: RefCell<Vec<String>>,
    clicks: RefCell<Vec<String>>,
}

impl FakeSession {
    fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    fn page(&self) -> &FakePage {
        &self.pages[self.current.get()]
    }

    fn clicked(&self, selector: &str) -> usize {
        self.clicks
            .borrow()
            .iter()
            .filter(|s| s.as_str() == selector)
            .count()
    }
}

impl Session for FakeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.navigations.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, _timeout: Duration) -> Result<bool> {
        let defaults = ScrapeConfig::default().selectors;
        if selector == defaults.job_card {
            Ok(!self.page().cards.is_empty())
        } else if selector == defaults.overlay_dismiss {
            Ok(self.overlay_present)
        } else {
            Ok(false)
        }
    }

    fn find_cards(&self, _selector: &str) -> Result<Vec<Box<dyn Card + '_>>> {
        Ok(self
            .page()
            .cards
            .iter()
            .map(|card| Box::new(card.clone()) as Box<dyn Card + '_>)
            .collect())
    }

    fn wait_until_visible(&self, _selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self.page().next.is_some())
    }

    fn is_enabled(&self, _selector: &str) -> Result<bool> {
        Ok(self.page().next.map(|n| n.enabled).unwrap_or(false))
    }

    fn wait_until_clickable(&self, _selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self.page().next.map(|n| n.clickable).unwrap_or(false))
    }

    fn click(&self, selector: &str) -> Result<()> {
        self.clicks.borrow_mut().push(selector.to_string());

        let defaults = ScrapeConfig::default().selectors;
        if selector == defaults.next_page {
            if self.fail_next_click {
                return Err(ScrapeError::session("connection lost mid-click"));
            }
            for card in &self.page().cards {
                card.stale.store(true, Ordering::Relaxed);
            }
            self.current.set(self.current.get() + 1);
        }
        Ok(())
    }
}

fn run(session: &FakeSession) -> Vec<vaga_scrape::JobRecord> {
    let config = ScrapeConfig::default();
    let mut orchestrator = ScrapeOrchestrator::new(session, &config);
    orchestrator.run().unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios

#[test]
fn single_page_with_two_full_cards_and_no_next_control() {
    let session = FakeSession::new(vec![FakePage {
        cards: vec![
            FakeCard::full("abc123", "Dev Python", "Acme", "Remoto"),
            FakeCard::full("def456", "Dev Rust", "Beta", "SP"),
        ],
        next: None,
    }]);

    let records = run(&session);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].source_id.as_deref(), Some("abc123"));
    assert_eq!(records[0].url, "https://br.indeed.com/viewjob?jk=abc123");
    assert_eq!(records[1].company, "Beta");
    assert_eq!(session.navigations.borrow().len(), 1);
}

#[test]
fn second_page_without_cards_keeps_first_page_records() {
    let session = FakeSession::new(vec![
        FakePage {
            cards: vec![
                FakeCard::full("1", "a", "c1", "l1"),
                FakeCard::full("2", "b", "c2", "l2"),
                FakeCard::full("3", "c", "c3", "l3"),
            ],
            next: Some(NextControl::enabled()),
        },
        FakePage {
            cards: vec![],
            next: None,
        },
    ]);

    let records = run(&session);

    assert_eq!(records.len(), 3);
    let ids: Vec<_> = records.iter().filter_map(|r| r.source_id.clone()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn accumulator_preserves_page_then_card_order() {
    let session = FakeSession::new(vec![
        FakePage {
            cards: vec![
                FakeCard::full("p1a", "t", "c", "l"),
                FakeCard::full("p1b", "t", "c", "l"),
            ],
            next: Some(NextControl::enabled()),
        },
        FakePage {
            cards: vec![
                FakeCard::full("p2a", "t", "c", "l"),
                FakeCard::full("p2b", "t", "c", "l"),
            ],
            next: None,
        },
    ]);

    let records = run(&session);
    let ids: Vec<_> = records.iter().filter_map(|r| r.source_id.clone()).collect();
    assert_eq!(ids, ["p1a", "p1b", "p2a", "p2b"]);
}

#[test]
fn cards_without_anchor_are_skipped() {
    let session = FakeSession::new(vec![FakePage {
        cards: vec![
            FakeCard::without_anchor(),
            FakeCard::full("ok", "t", "c", "l"),
            FakeCard::without_anchor(),
        ],
        next: None,
    }]);

    let records = run(&session);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_id.as_deref(), Some("ok"));
}

#[test]
fn absent_overlay_changes_nothing() {
    let pages = || {
        vec![FakePage {
            cards: vec![FakeCard::full("x", "t", "c", "l")],
            next: None,
        }]
    };

    let without_overlay = FakeSession::new(pages());
    let mut with_overlay = FakeSession::new(pages());
    with_overlay.overlay_present = true;

    let selectors = ScrapeConfig::default().selectors;
    assert_eq!(run(&without_overlay).len(), run(&with_overlay).len());
    assert_eq!(without_overlay.clicked(&selectors.overlay_dismiss), 0);
    assert_eq!(with_overlay.clicked(&selectors.overlay_dismiss), 1);
}

#[test]
fn disabled_next_control_ends_run_without_click() {
    let session = FakeSession::new(vec![FakePage {
        cards: vec![FakeCard::full("x", "t", "c", "l")],
        next: Some(NextControl::disabled()),
    }]);

    let records = run(&session);

    let selectors = ScrapeConfig::default().selectors;
    assert_eq!(records.len(), 1);
    assert_eq!(session.clicked(&selectors.next_page), 0);
}

#[test]
fn click_failure_ends_collection_with_harvested_records() {
    let mut session = FakeSession::new(vec![
        FakePage {
            cards: vec![FakeCard::full("kept", "t", "c", "l")],
            next: Some(NextControl::enabled()),
        },
        FakePage {
            cards: vec![FakeCard::full("never-reached", "t", "c", "l")],
            next: None,
        },
    ]);
    session.fail_next_click = true;

    let records = run(&session);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_id.as_deref(), Some("kept"));
}

#[test]
fn cancellation_stops_between_pages() {
    let session = FakeSession::new(vec![
        FakePage {
            cards: vec![FakeCard::full("x", "t", "c", "l")],
            next: Some(NextControl::enabled()),
        },
        FakePage {
            cards: vec![FakeCard::full("y", "t", "c", "l")],
            next: None,
        },
    ]);

    let config = ScrapeConfig::default();
    let mut orchestrator = ScrapeOrchestrator::new(&session, &config);
    orchestrator.cancel_flag().cancel();

    let records = orchestrator.run().unwrap();
    assert!(records.is_empty());
    assert_eq!(session.navigations.borrow().len(), 1);
}

#[test]
fn missing_sub_fields_degrade_to_empty_strings() {
    let mut card = FakeCard::full("id1", "Title", "ignored", "ignored");
    card.company = None;
    card.location = None;

    let session = FakeSession::new(vec![FakePage {
        cards: vec![card],
        next: None,
    }]);

    let records = run(&session);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].company, "");
    assert_eq!(records[0].location, "");
    assert_eq!(records[0].title, "Title");
}
