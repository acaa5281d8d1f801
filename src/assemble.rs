//! Result assembler module
//!
//! Converts described module candidates into the output schema, validates
//! them, and writes the final JSON document atomically.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::error::Error as CrateError;
use crate::outline::ModuleCandidate;

/// Error type for assembly and output
#[derive(Debug, Error)]
pub enum AssembleError {
    /// A candidate reached assembly without a title
    #[error("module candidate has an empty title")]
    EmptyTitle,

    /// A candidate reached assembly without a description
    #[error("no description generated for '{0}'")]
    EmptyDescription(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AssembleError> for CrateError {
    fn from(err: AssembleError) -> Self {
        match err {
            AssembleError::Json(e) => CrateError::Json(e),
            AssembleError::Io(e) => CrateError::Io(e),
            _ => CrateError::Assemble(err.to_string()),
        }
    }
}

/// One entry of the final result document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleEntry {
    /// Module title
    pub module: String,

    /// Module description
    pub description: String,

    /// Submodule name -> submodule description
    pub submodules: BTreeMap<String, String>,
}

/// Convert described candidates into validated output entries.
///
/// Titles and descriptions must be non-empty; a missing description here is
/// a bug in the describe stage and fails hard. Duplicate module titles are
/// merged case-insensitively (first occurrence keeps its position and
/// description); duplicate submodule names within a module overwrite.
#[instrument(skip(candidates), fields(candidates = candidates.len()))]
pub fn assemble(candidates: &[ModuleCandidate]) -> Result<Vec<ModuleEntry>, AssembleError> {
    let mut entries: Vec<ModuleEntry> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for candidate in candidates {
        let title = candidate.title.trim();
        if title.is_empty() {
            return Err(AssembleError::EmptyTitle);
        }
        let description = candidate
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AssembleError::EmptyDescription(title.to_string()))?;

        let key = title.to_lowercase();
        let entry_index = match index.get(&key) {
            Some(&i) => {
                debug!("Merging duplicate module '{}'", title);
                i
            }
            None => {
                entries.push(ModuleEntry {
                    module: title.to_string(),
                    description: description.to_string(),
                    submodules: BTreeMap::new(),
                });
                let i = entries.len() - 1;
                index.insert(key, i);
                i
            }
        };

        for submodule in &candidate.submodules {
            let sub_title = submodule.title.trim();
            if sub_title.is_empty() {
                return Err(AssembleError::EmptyTitle);
            }
            let sub_description = submodule
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .ok_or_else(|| AssembleError::EmptyDescription(sub_title.to_string()))?;
            entries[entry_index]
                .submodules
                .insert(sub_title.to_string(), sub_description.to_string());
        }
    }

    info!("Assembled {} module entries", entries.len());
    Ok(entries)
}

/// Serialize entries to pretty JSON and write them atomically.
///
/// The document is written to a temporary file in the destination directory
/// and renamed into place, so a failed write never leaves a partial file.
#[instrument(skip(entries), fields(entries = entries.len()))]
pub async fn write_output(entries: &[ModuleEntry], path: &Path) -> Result<(), AssembleError> {
    let json = serde_json::to_string_pretty(entries)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json).await?;
    tokio::fs::rename(&tmp_path, path).await?;

    info!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SubmoduleCandidate;

    fn described(title: &str, description: &str) -> ModuleCandidate {
        ModuleCandidate {
            title: title.to_string(),
            body: String::new(),
            description: Some(description.to_string()),
            submodules: Vec::new(),
        }
    }

    #[test]
    fn test_assemble_basic() {
        let mut candidate = described("Billing", "Payments and invoices.");
        candidate.submodules.push(SubmoduleCandidate {
            title: "Invoices".to_string(),
            body: String::new(),
            description: Some("Invoice management.".to_string()),
        });

        let entries = assemble(&[candidate]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].module, "Billing");
        assert_eq!(entries[0].submodules["Invoices"], "Invoice management.");
    }

    #[test]
    fn test_missing_description_is_error() {
        let mut candidate = described("Billing", "ok");
        candidate.description = None;
        assert!(matches!(
            assemble(&[candidate]),
            Err(AssembleError::EmptyDescription(_))
        ));
    }

    #[test]
    fn test_duplicate_titles_merge_case_insensitive() {
        let mut second = described("BILLING", "Other description.");
        second.submodules.push(SubmoduleCandidate {
            title: "Refunds".to_string(),
            body: String::new(),
            description: Some("Refund policy.".to_string()),
        });

        let entries = assemble(&[described("Billing", "First."), second]).unwrap();
        assert_eq!(entries.len(), 1);
        // First occurrence keeps its title and description
        assert_eq!(entries[0].module, "Billing");
        assert_eq!(entries[0].description, "First.");
        assert!(entries[0].submodules.contains_key("Refunds"));
    }

    #[test]
    fn test_module_titles_unique_case_insensitive() {
        let entries = assemble(&[
            described("Billing", "a"),
            described("Security", "b"),
            described("billing", "c"),
        ])
        .unwrap();

        let mut lowered: Vec<String> =
            entries.iter().map(|e| e.module.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), entries.len());
    }

    #[test]
    fn test_all_descriptions_nonempty() {
        let entries = assemble(&[
            described("Billing", "Payments."),
            described("Security", "Protection."),
        ])
        .unwrap();

        for entry in &entries {
            assert!(!entry.description.is_empty());
            for description in entry.submodules.values() {
                assert!(!description.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_write_output_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("modules.json");
        let entries = vec![ModuleEntry {
            module: "Billing".to_string(),
            description: "Payments.".to_string(),
            submodules: BTreeMap::from([("Invoices".to_string(), "Invoice list.".to_string())]),
        }];

        write_output(&entries, &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<ModuleEntry> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, entries);

        // No temporary file left behind
        assert!(!path.with_extension("json.tmp").exists());
    }
}
