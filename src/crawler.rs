//! Website crawler module
//!
//! This module provides functionality for crawling documentation websites
//! breadth-first within a single host, with depth and page-count bounds.

mod config;
mod error;
mod fetch;

pub use config::CrawlConfig;
pub use error::CrawlError;
pub use fetch::{crawl, validate_seeds};

use serde::{Deserialize, Serialize};

/// A fetched page with its raw HTML
///
/// Pages exist only for the duration of the pipeline run; they are consumed
/// by the normalizer and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// URL of the page
    pub url: String,

    /// Raw HTML of the page
    pub html: String,

    /// Depth at which the page was reached (seeds are depth 0)
    pub depth: u32,
}
