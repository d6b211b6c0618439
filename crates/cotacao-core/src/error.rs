//! Error types for the quote services
//!
//! A deadline expiry is not an error: see [`crate::Deadline`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Upstream returned no quotes")]
    EmptyResponse,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::Decode(e.to_string())
    }
}
