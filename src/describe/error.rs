//! Error types for the describe module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for description generation
#[derive(Debug, Error)]
pub enum DescribeError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Rate limit exceeded after exhausting retries
    #[error("Rate limit exceeded. Please retry after {retry_after_secs} seconds")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

impl DescribeError {
    /// Whether the error is transient and worth retrying
    pub fn is_transient(&self) -> bool {
        match self {
            DescribeError::RateLimit { .. } => true,
            DescribeError::Http(e) => e.is_timeout() || e.is_connect(),
            DescribeError::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

impl From<DescribeError> for CrateError {
    fn from(err: DescribeError) -> Self {
        match err {
            DescribeError::Http(e) => CrateError::Http(e),
            _ => CrateError::Describe(err.to_string()),
        }
    }
}
