//! # modex - Documentation Module Extractor
//!
//! This crate crawls documentation websites and produces a structured
//! hierarchy of modules and submodules with generated descriptions. The
//! pipeline is a strictly sequential chain of stages:
//!
//! crawl -> normalize -> group -> describe -> assemble
//!
//! ## Features
//!
//! - Bounded breadth-first crawling within a single host, with a politeness
//!   delay and per-page fail-soft behavior
//! - Boilerplate-free content extraction into heading + body blocks
//! - Heading-level grouping into module/submodule candidates with a keyword
//!   fallback for unstructured pages
//! - Descriptions via an external generative text service, with a pure
//!   template fallback when no credential is configured or a call fails
//! - Validated, atomically written JSON output
//!
//! ## Example
//!
//! ```rust,no_run
//! use modex::pipeline::{run_pipeline, ExtractorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seeds = vec!["https://help.example.com".to_string()];
//!     let entries = run_pipeline(&seeds, ExtractorConfig::default()).await?;
//!
//!     for entry in &entries {
//!         println!("{}: {}", entry.module, entry.description);
//!     }
//!     Ok(())
//! }
//! ```

mod error;

// Pipeline stage modules
pub mod assemble;
pub mod crawler;
pub mod describe;
pub mod normalize;
pub mod outline;
pub mod pipeline;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
