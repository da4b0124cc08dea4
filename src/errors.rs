use chrono::NaiveDate;
use thiserror::Error;

/// Error type that captures common SubTracker failures.
#[derive(Debug, Error)]
pub enum SubTrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Malformed date `{0}`")]
    MalformedDate(String),
    #[error("Invalid week anchor {date}: {reason}")]
    InvalidAnchor { date: NaiveDate, reason: String },
    #[error("Planning horizon must be at least one week (got {0})")]
    InvalidHorizon(u32),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SubTrackerError>;
