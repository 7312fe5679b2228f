use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Browser session error: {message}")]
    Session { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ScrapeError {
    /// Wraps an arbitrary browser-engine failure. The engine reports
    /// `anyhow::Error`, which we flatten to a message at the port boundary.
    pub fn session(err: impl std::fmt::Display) -> Self {
        ScrapeError::Session {
            message: err.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ScrapeError::ConfigError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
