//! Nomad changelog entities
//!
//! The changelog records each refinement the user applied to Nomad's prompts
//! or memories. Entries are kept newest first.

use serde::{Deserialize, Serialize};

/// Version reported when the changelog is empty
pub const DEFAULT_NOMAD_VERSION: &str = "0.3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: String,
    pub summary: String,
    #[serde(default)]
    pub impacted_modules: Vec<String>,
    #[serde(default)]
    pub files_updated_by_tan: Vec<String>,
    /// Local ISO-8601 time the entry was recorded
    #[serde(default)]
    pub timestamp: String,
}

/// Data needed to record a new changelog entry
#[derive(Debug, Clone)]
pub struct NewChangelogEntry {
    pub version: String,
    pub date: String,
    pub summary: String,
    pub impacted_modules: Vec<String>,
    pub files_updated: Vec<String>,
}

/// Bump the patch component of a `major.minor.patch` version.
///
/// Anything that isn't exactly three integers gets a `-next` suffix instead.
pub fn next_patch_version(current: &str) -> Option<String> {
    let parts: Vec<&str> = current.split('.').collect();
    if let [major, minor, patch] = parts.as_slice() {
        if let (Ok(major), Ok(minor), Ok(patch)) = (
            major.parse::<u64>(),
            minor.parse::<u64>(),
            patch.parse::<u64>(),
        ) {
            return patch
                .checked_add(1)
                .map(|patch| format!("{}.{}.{}", major, minor, patch));
        }
    }
    None
}
