//! Error types for the modex crate

use thiserror::Error;

/// Result type for modex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for modex operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No valid seed URLs were provided
    #[error("no valid seed URLs: {0}")]
    InvalidSeeds(String),

    /// Description generation error
    #[error("Describe error: {0}")]
    Describe(String),

    /// Result assembly or output error
    #[error("Assemble error: {0}")]
    Assemble(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
