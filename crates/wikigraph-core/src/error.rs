//! Error types for wikigraph.

use thiserror::Error;

/// Result type alias using wikigraph's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for wikigraph operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(uuid::Uuid),

    /// Title corpus could not be read
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Keyword matching failed
    #[error("Match error: {0}")]
    Match(String),

    /// Markup annotation failed
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
