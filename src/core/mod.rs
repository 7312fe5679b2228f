pub mod extractor;
pub mod orchestrator;
pub mod pagination;
pub mod sync;

pub use crate::domain::model::JobRecord;
pub use crate::domain::ports::{Card, Session, SessionFactory};
pub use crate::utils::error::Result;
