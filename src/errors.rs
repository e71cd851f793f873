//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// HTTP client construction or low-level transport failure.
    Http(String),
    /// Request rejected locally before any remote interaction
    /// (empty input, busy re-entrancy, gate not satisfied).
    Rejected(String),
    /// Remote-reported or transport failure during video ingestion.
    Ingestion(String),
    /// Answer provider could not produce a reply for a chat turn.
    Answer(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Http(msg) => write!(f, "http: {msg}"),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
            Self::Ingestion(msg) => write!(f, "ingestion: {msg}"),
            Self::Answer(msg) => write!(f, "answer: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}
