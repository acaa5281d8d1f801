//! Remote description generation via an OpenAI-compatible chat endpoint
//!
//! One request per candidate: a fixed prompt with the candidate title and
//! aggregated body text, bounded output length. Transient failures (HTTP 429,
//! 5xx, timeouts) are retried with exponential backoff and an optional
//! Retry-After hint; permanent failures return immediately so the caller can
//! fall back to template generation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::describe::config::DescribeConfig;
use crate::describe::error::DescribeError;

/// Backoff cap in seconds
const MAX_BACKOFF_SECS: u64 = 60;

/// How much body text is sent with a single prompt
const MAX_PROMPT_BODY_CHARS: usize = 2000;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

const SYSTEM_PROMPT: &str = "You are an expert at analyzing software documentation. \
Write clear, concise descriptions of product features based only on the provided content.";

fn truncate_at_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Build the per-candidate prompt
fn build_prompt(title: &str, body: &str) -> String {
    format!(
        "Write a one- or two-sentence description of the documentation topic \"{}\" \
         based on the following content. Return only the description text.\n\n{}",
        title,
        truncate_at_char_boundary(body, MAX_PROMPT_BODY_CHARS)
    )
}

/// Client for the remote description service
#[derive(Debug, Clone)]
pub struct RemoteGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_retries: u32,
    default_retry_after_secs: u64,
    max_output_tokens: u32,
}

impl RemoteGenerator {
    /// Create a generator from configuration.
    ///
    /// Returns an error when no API key is configured.
    pub fn from_config(config: &DescribeConfig) -> Result<Self, DescribeError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| DescribeError::Auth("no API key configured".to_string()))?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            default_retry_after_secs: config.retry_after_secs,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Generate a description for a titled block of text
    #[instrument(skip(self, body), fields(title = title))]
    pub async fn describe(&self, title: &str, body: &str) -> Result<String, DescribeError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: build_prompt(title, body),
                },
            ],
            max_tokens: self.max_output_tokens,
            temperature: 0.3,
        };

        let response: ChatResponse = self.execute(&request).await?;
        let text = response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| {
                DescribeError::UnexpectedResponse("response contained no choices".to_string())
            })?;

        if text.is_empty() {
            return Err(DescribeError::UnexpectedResponse(
                "service returned an empty description".to_string(),
            ));
        }
        Ok(text)
    }

    /// Send the request, retrying transient failures with exponential backoff
    async fn execute(&self, request: &ChatRequest) -> Result<ChatResponse, DescribeError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut attempts: u32 = 0;

        loop {
            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await;

            let error = match result {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let text = response.text().await.map_err(DescribeError::Http)?;
                        return serde_json::from_str(&text).map_err(|e| {
                            error!("Failed to parse response: {}", e);
                            DescribeError::UnexpectedResponse(format!(
                                "failed to parse response: {}",
                                e
                            ))
                        });
                    }

                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(self.default_retry_after_secs);
                    let message = response.text().await.unwrap_or_default();
                    error!("API error: {} - {}", status, message);

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        DescribeError::RateLimit {
                            retry_after_secs: retry_after,
                        }
                    } else if status == StatusCode::UNAUTHORIZED {
                        DescribeError::Auth("invalid API key or credentials".to_string())
                    } else {
                        DescribeError::Api {
                            status_code: status.as_u16(),
                            message,
                        }
                    }
                }
                Err(e) => DescribeError::Http(e),
            };

            attempts += 1;
            if !error.is_transient() || attempts > self.max_retries {
                return Err(error);
            }

            let base = match &error {
                DescribeError::RateLimit { retry_after_secs } => *retry_after_secs,
                _ => self.default_retry_after_secs,
            };
            let delay = base
                .saturating_mul(u64::pow(2, attempts - 1))
                .min(MAX_BACKOFF_SECS);
            debug!(
                "Transient service error, retrying after {}s (attempt {}/{})",
                delay, attempts, self.max_retries
            );
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }
    }
}
