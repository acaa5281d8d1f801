//! # Describe Configuration Module
//!
//! Configuration for the description generator: which backend to use (remote
//! generative service vs local templates), credentials, model selection and
//! retry behavior. Uses the same builder pattern as the crawler config.

use std::time::Duration;

/// Configuration for the description generator
#[derive(Debug, Clone)]
pub struct DescribeConfig {
    /// API key for the remote generation service; template fallback is used
    /// when absent
    pub api_key: Option<String>,

    /// Model identifier for remote generation
    pub model: String,

    /// Base URL of the remote service (OpenAI-compatible)
    pub base_url: String,

    /// Maximum retry attempts for transient service errors
    pub max_retries: u32,

    /// Default retry delay in seconds when no Retry-After header is present
    pub retry_after_secs: u64,

    /// Upper bound on generated description length in tokens
    pub max_output_tokens: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_retries: 3,
            retry_after_secs: 2,
            max_output_tokens: 256,
            timeout_secs: 30,
        }
    }
}

/// Builder for DescribeConfig
#[derive(Debug, Default)]
pub struct DescribeConfigBuilder {
    config: DescribeConfig,
}

impl DescribeConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: DescribeConfig::default(),
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the base URL of the remote service
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the maximum number of retries for transient errors
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the default retry delay in seconds
    pub fn retry_after_secs(mut self, retry_after_secs: u64) -> Self {
        self.config.retry_after_secs = retry_after_secs;
        self
    }

    /// Set the maximum output length in tokens
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.config.max_output_tokens = max_output_tokens;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DescribeConfig {
        self.config
    }
}

impl DescribeConfig {
    /// Create a new builder
    pub fn builder() -> DescribeConfigBuilder {
        DescribeConfigBuilder::new()
    }

    /// Get the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
