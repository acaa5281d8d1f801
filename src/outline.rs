//! Heuristic grouper module
//!
//! Groups normalized [`ContentBlock`]s into module/submodule candidates.
//! Heading level is the primary signal: the shallowest heading level present
//! opens modules, deeper headings become submodules of the current module.
//! Headingless blocks fall back to keyword matching against known section
//! topics. Titles are deduplicated case-insensitively; duplicates merge.

mod keywords;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::normalize::ContentBlock;

/// Maximum submodules harvested from body text per module
const MAX_HARVESTED_SUBMODULES: usize = 5;

/// A candidate submodule awaiting a description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmoduleCandidate {
    /// Cleaned submodule title
    pub title: String,

    /// Aggregated body text
    pub body: String,

    /// Generated description, attached by the describe stage
    pub description: Option<String>,
}

/// A candidate module awaiting a description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCandidate {
    /// Cleaned module title
    pub title: String,

    /// Aggregated body text
    pub body: String,

    /// Generated description, attached by the describe stage
    pub description: Option<String>,

    /// Ordered submodules, unique by case-insensitive title
    pub submodules: Vec<SubmoduleCandidate>,
}

impl ModuleCandidate {
    fn new(title: String, body: String) -> Self {
        Self {
            title,
            body,
            description: None,
            submodules: Vec::new(),
        }
    }

    /// Add a submodule, merging into an existing one on a case-insensitive
    /// title match
    fn push_submodule(&mut self, title: String, body: String) {
        let key = title.to_lowercase();
        if let Some(existing) = self
            .submodules
            .iter_mut()
            .find(|s| s.title.to_lowercase() == key)
        {
            append_body(&mut existing.body, &body);
        } else {
            self.submodules.push(SubmoduleCandidate {
                title,
                body,
                description: None,
            });
        }
    }
}

fn append_body(target: &mut String, extra: &str) {
    if extra.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(extra);
}

/// Words dropped from titles unless they lead the phrase
const STOP_WORDS: &[&str] = &[
    "The", "And", "Or", "But", "In", "On", "At", "To", "For", "Of", "With", "By",
];

/// Clean a raw heading into a module/submodule title.
///
/// Strips special characters, title-cases each word and drops embedded
/// stop-words (a leading stop-word is kept).
pub fn clean_title(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
        .collect();

    let mut words = Vec::new();
    for word in stripped.split_whitespace() {
        let mut chars = word.chars();
        let cased = match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => continue,
        };
        if words.is_empty() || !STOP_WORDS.contains(&cased.as_str()) {
            words.push(cased);
        }
    }

    words.join(" ")
}

/// Group content blocks into module candidates.
///
/// The shallowest heading level across the input is treated as the module
/// level; deeper blocks attach to the most recent module as submodules.
/// Blocks without a heading are classified by keyword matching and dropped
/// when nothing matches.
#[instrument(skip(blocks), fields(blocks = blocks.len()))]
pub fn group_blocks(blocks: &[ContentBlock]) -> Vec<ModuleCandidate> {
    let module_level = blocks
        .iter()
        .filter(|b| !b.heading.is_empty())
        .map(|b| b.level)
        .min()
        .unwrap_or(1);

    let mut modules: Vec<ModuleCandidate> = Vec::new();
    // Case-insensitive title -> index into modules
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    fn open_module(
        modules: &mut Vec<ModuleCandidate>,
        index: &mut HashMap<String, usize>,
        title: String,
        body: String,
    ) -> usize {
        let key = title.to_lowercase();
        match index.get(&key) {
            Some(&i) => {
                append_body(&mut modules[i].body, &body);
                i
            }
            None => {
                modules.push(ModuleCandidate::new(title, body));
                let i = modules.len() - 1;
                index.insert(key, i);
                i
            }
        }
    }

    for block in blocks {
        if block.heading.is_empty() {
            // Keyword fallback for pages without heading structure
            let Some(topic) = keywords::section_indicator(&block.body) else {
                debug!("Dropping headingless block with no topic match");
                continue;
            };
            let title = clean_title(&topic);
            if title.is_empty() {
                continue;
            }
            current = Some(open_module(
                &mut modules,
                &mut index,
                title,
                block.body.clone(),
            ));
            continue;
        }

        let title = clean_title(&block.heading);
        if title.is_empty() {
            continue;
        }

        if block.level <= module_level {
            current = Some(open_module(
                &mut modules,
                &mut index,
                title,
                block.body.clone(),
            ));
        } else {
            match current {
                Some(i) => modules[i].push_submodule(title, block.body.clone()),
                // Deeper heading with no open module: promote it
                None => {
                    current = Some(open_module(
                        &mut modules,
                        &mut index,
                        title,
                        block.body.clone(),
                    ));
                }
            }
        }
    }

    // Modules without structural submodules get a best-effort harvest from
    // their body text: list items first, then action phrases
    for module in &mut modules {
        if module.submodules.is_empty() {
            let mut phrases = keywords::list_items(&module.body, MAX_HARVESTED_SUBMODULES);
            if phrases.len() < MAX_HARVESTED_SUBMODULES {
                phrases.extend(keywords::action_phrases(
                    &module.body,
                    MAX_HARVESTED_SUBMODULES - phrases.len(),
                ));
            }
            for (title, context) in phrases {
                if module.submodules.len() >= MAX_HARVESTED_SUBMODULES {
                    break;
                }
                let cleaned = clean_title(&title);
                if !cleaned.is_empty() && cleaned.to_lowercase() != module.title.to_lowercase() {
                    module.push_submodule(cleaned, context);
                }
            }
        }
    }

    debug!("Grouped {} blocks into {} modules", blocks.len(), modules.len());
    modules
}
