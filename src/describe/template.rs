//! Template-based description generation
//!
//! The local fallback for when no remote service is configured or a remote
//! call fails. Pure functions of the candidate title and body text, so output
//! is fully deterministic.

use tracing::debug;

/// Canned descriptions for well-known documentation topics
const TOPIC_TEMPLATES: &[(&str, &str)] = &[
    (
        "account",
        "Account Management - Features for managing user accounts, profiles, and personal settings",
    ),
    (
        "billing",
        "Billing and Payments - Payment processing, subscription management, and billing features",
    ),
    (
        "security",
        "Security and Privacy - Security settings, privacy controls, and account protection features",
    ),
    (
        "api",
        "API and Integration - API documentation, integration guides, and developer resources",
    ),
    (
        "setup",
        "Setup and Configuration - Initial setup, configuration options, and getting started guides",
    ),
    (
        "support",
        "Support and Help - Help resources, troubleshooting, and customer support features",
    ),
    (
        "dashboard",
        "Dashboard and Analytics - Main dashboard features and analytics tools",
    ),
    (
        "user",
        "User Management - User account features and management capabilities",
    ),
    (
        "settings",
        "Settings and Preferences - Application settings and user preferences",
    ),
    (
        "admin",
        "Administration - Administrative tools and management features",
    ),
];

/// Longest excerpt taken from body text for a description
const MAX_EXCERPT_CHARS: usize = 160;

/// Shortest body sentence considered usable as a description on its own
const MIN_SENTENCE_CHARS: usize = 20;

/// Take the first sentence of a text, if it is long enough to stand alone
fn first_sentence(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed
        .find(['.', '!', '?'])
        .map(|i| i + 1)
        .unwrap_or(trimmed.len());
    let sentence = trimmed[..end].trim();
    (sentence.len() >= MIN_SENTENCE_CHARS).then_some(sentence)
}

fn clip(text: &str) -> String {
    if text.len() <= MAX_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut end = MAX_EXCERPT_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Local, deterministic description generator
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Create a new template generator
    pub fn new() -> Self {
        Self
    }

    /// Generate a module description.
    ///
    /// Tries, in order: a canned topic template matched on the title, the
    /// first sentence of the body, and a generic fallback line. The result
    /// is never empty.
    pub fn module_description(&self, title: &str, body: &str) -> String {
        let title_lower = title.to_lowercase();
        for (keyword, template) in TOPIC_TEMPLATES {
            if title_lower.contains(keyword) {
                debug!("Topic template matched for {}", title);
                return (*template).to_string();
            }
        }

        if let Some(sentence) = first_sentence(body) {
            return format!("{} - {}", title, clip(sentence));
        }

        format!(
            "{} - Documentation and features related to {}",
            title, title_lower
        )
    }

    /// Generate a submodule description.
    ///
    /// Uses the first body sentence when one is available, otherwise a
    /// templated line naming the submodule. The result is never empty.
    pub fn submodule_description(&self, title: &str, body: &str) -> String {
        if let Some(sentence) = first_sentence(body) {
            let mut description = clip(sentence);
            if !description.ends_with(['.', '!', '?']) {
                description.push('.');
            }
            return description;
        }

        format!(
            "Functionality for {} operations and management",
            title.to_lowercase()
        )
    }
}
