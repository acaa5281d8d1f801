//! Keyword heuristics for the grouper
//!
//! Section-indicator patterns classify headingless text into a known topic;
//! list-item and action patterns harvest submodule candidates from body
//! text.

use std::sync::LazyLock;

use regex::Regex;

/// Topic phrases that commonly name documentation sections
static SECTION_INDICATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)getting\s+started",
        r"(?i)quick\s+start",
        r"(?i)installation",
        r"(?i)setup",
        r"(?i)configuration",
        r"(?i)api\s+reference",
        r"(?i)user\s+guide",
        r"(?i)tutorial",
        r"(?i)how\s+to",
        r"(?i)faq",
        r"(?i)troubleshooting",
        r"(?i)account\s+management",
        r"(?i)billing",
        r"(?i)security",
        r"(?i)integration",
        r"(?i)features",
        r"(?i)settings",
        r"(?i)admin",
        r"(?i)dashboard",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Numbered or bulleted list items, the strongest submodule signal in
/// unstructured body text
static LIST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d+[.)]\s+([A-Za-z][^.!?\d\n]{4,50})",
        r"[-*•]\s+([A-Za-z][^.!?\n*•-]{4,50})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Action-oriented phrases that usually describe a submodule
static ACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)how\s+to\s+([^.!?]{5,50})",
        r"(?i)create\s+([^.!?]{5,30})",
        r"(?i)delete\s+([^.!?]{5,30})",
        r"(?i)manage\s+([^.!?]{5,30})",
        r"(?i)configure\s+([^.!?]{5,30})",
        r"(?i)set\s+up\s+([^.!?]{5,30})",
        r"(?i)add\s+([^.!?]{5,30})",
        r"(?i)remove\s+([^.!?]{5,30})",
        r"(?i)update\s+([^.!?]{5,30})",
        r"(?i)edit\s+([^.!?]{5,30})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Find the first section indicator matching the text, if any
pub fn section_indicator(text: &str) -> Option<String> {
    SECTION_INDICATORS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

fn collect_phrases(patterns: &[Regex], text: &str, limit: usize) -> Vec<(String, String)> {
    let mut seen = std::collections::HashSet::new();
    let mut phrases = Vec::new();

    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let (Some(whole), Some(fragment)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let title = fragment.as_str().trim().to_string();
            if title.is_empty() || !seen.insert(title.to_lowercase()) {
                continue;
            }
            phrases.push((title, whole.as_str().trim().to_string()));
            if phrases.len() >= limit {
                return phrases;
            }
        }
    }

    phrases
}

/// Harvest submodule candidates from numbered or bulleted list items.
///
/// Returns (title fragment, matched context) pairs, at most `limit`, in
/// match order with exact duplicates removed.
pub fn list_items(text: &str, limit: usize) -> Vec<(String, String)> {
    collect_phrases(&LIST_PATTERNS, text, limit)
}

/// Harvest submodule candidates from action-oriented phrases.
///
/// Same shape as [`list_items`]; list items are the stronger signal and
/// should be consumed first.
pub fn action_phrases(text: &str, limit: usize) -> Vec<(String, String)> {
    collect_phrases(&ACTION_PATTERNS, text, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_indicator_match() {
        assert_eq!(
            section_indicator("Everything about Billing and invoices").as_deref(),
            Some("Billing")
        );
        assert_eq!(
            section_indicator("getting started with the api").as_deref(),
            Some("getting started")
        );
        assert!(section_indicator("lorem ipsum dolor").is_none());
    }

    #[test]
    fn test_action_phrases() {
        let text = "You can create new projects from the dashboard. \
                    How to invite team members to a workspace. \
                    Manage billing contacts under settings.";
        let phrases = action_phrases(text, 5);

        assert!(!phrases.is_empty());
        assert!(phrases.iter().any(|(t, _)| t.contains("new projects")));
        assert!(phrases.iter().any(|(t, _)| t.contains("invite team members")));
    }

    #[test]
    fn test_list_items_numbered() {
        let text = "Features include: 1. Create workspaces 2. Invite teammates 3. Track activity";
        let items = list_items(text, 5);

        assert_eq!(items.len(), 3);
        assert!(items[0].0.contains("Create workspaces"));
        assert!(items[1].0.contains("Invite teammates"));
        assert!(items[2].0.contains("Track activity"));
    }

    #[test]
    fn test_list_items_bulleted() {
        let text = "- Shared folders - Access controls * Audit logging";
        let items = list_items(text, 5);

        assert_eq!(items.len(), 3);
        assert!(items.iter().any(|(t, _)| t.contains("Shared folders")));
        assert!(items.iter().any(|(t, _)| t.contains("Audit logging")));
    }

    #[test]
    fn test_action_phrases_limit() {
        let text = "create one thing. create another thing. create a third thing. \
                    manage the first area. manage the second area. manage the third area.";
        let phrases = action_phrases(text, 2);
        assert_eq!(phrases.len(), 2);
    }
}
