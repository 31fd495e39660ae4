//! Error types for Kalima.

use thiserror::Error;

/// Library-level error type for Kalima operations.
#[derive(Error, Debug)]
pub enum KalimaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown catalog entry: {0}")]
    EntryNotFound(String),

    #[error("Video search failed: {0}")]
    VideoSearch(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Atomic write failed: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Kalima operations.
pub type Result<T> = std::result::Result<T, KalimaError>;
