//! # Crawler Configuration Module
//!
//! This module provides configuration options for the web crawler, including
//! controls for crawl depth, page limits and politeness delay. It uses a
//! builder pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlConfig`: The main configuration struct with crawler parameters
//! - `CrawlConfigBuilder`: Builder pattern implementation for easier configuration
//!
//! ## Features
//!
//! - Default configurations suitable for polite crawling of help sites
//! - Fine-grained control over crawl behavior (depth, pages, delay)
//! - User-agent customization

use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum depth to crawl
    pub max_depth: u32,

    /// Maximum number of pages to collect
    pub max_pages: usize,

    /// Delay in milliseconds between requests
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent to use for requests
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 30,
            delay_ms: 1000,
            timeout_secs: 10,
            user_agent: format!("modex-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for CrawlConfig
#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlConfig::default(),
        }
    }

    /// Set the maximum depth to crawl
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the maximum number of pages to collect
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the delay in milliseconds between requests
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlConfig {
        self.config
    }
}

impl CrawlConfig {
    /// Create a new builder
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::new()
    }

    /// Get the inter-request delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Get the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_pages, 30);
        assert_eq!(config.delay_ms, 1000);
    }

    #[test]
    fn test_builder() {
        let config = CrawlConfig::builder()
            .max_depth(1)
            .max_pages(5)
            .delay_ms(0)
            .user_agent("test-agent")
            .build();

        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.delay(), Duration::from_millis(0));
    }
}
