pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

// Exporting types for convenience
pub use config::{CliConfig, OutputFormat, ScrapeConfig, Selectors, Timeouts, TomlConfig};
pub use core::orchestrator::{CancelFlag, ScrapeOrchestrator};
pub use domain::model::JobRecord;
pub use domain::ports::{Card, Session, SessionFactory};
pub use utils::error::{Result, ScrapeError};
