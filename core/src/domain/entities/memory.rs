//! MEMORIES domain entities
//!
//! Memories are free-form structured documents (JSON or YAML) converted from
//! the user's Markdown notes. The copilot never imposes a schema on them; it
//! only addresses documents by key and sections by path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Memories every context compilation draws from
pub const CORE_MEMORY_KEYS: [&str; 3] = [
    "tan_core_identity_values",
    "tan_growth_plan_goals",
    "tan_cognitive_os_preferences",
];

/// Validated memory document key (file stem under the memories directory)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemoryKey(String);

impl MemoryKey {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let raw = raw.trim();
        if raw.is_empty()
            || !raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ParseError::InvalidKey(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Keys of the core memories
    pub fn core() -> Vec<MemoryKey> {
        CORE_MEMORY_KEYS
            .iter()
            .map(|k| MemoryKey(k.to_string()))
            .collect()
    }

    /// Placeholder document written when a core memory file is missing
    pub fn placeholder_document(&self) -> Value {
        serde_json::json!({
            "placeholder_data": format!("Data for {} to be populated from Markdown.", self.0),
            "version": "1.0",
            "last_reviewed_by_tan": null,
        })
    }
}

impl TryFrom<String> for MemoryKey {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MemoryKey::parse(&value)
    }
}

impl From<MemoryKey> for String {
    fn from(key: MemoryKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MemoryKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemoryKey::parse(s)
    }
}

/// One step into a memory document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionSegment {
    Index(usize),
    Key(String),
}

impl std::fmt::Display for SectionSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionSegment::Index(i) => write!(f, "{}", i),
            SectionSegment::Key(k) => write!(f, "{}", k),
        }
    }
}

/// Path into a memory document, written `Section/Subsection/0`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPath(pub Vec<SectionSegment>);

impl SectionPath {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk the document; numeric segments index arrays, and fall back to
    /// object keys so that a key like "2024" still resolves.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(document, |current, segment| match segment {
            SectionSegment::Index(i) => match current {
                Value::Array(items) => items.get(*i),
                Value::Object(map) => map.get(&i.to_string()),
                _ => None,
            },
            SectionSegment::Key(k) => current.as_object().and_then(|map| map.get(k)),
        })
    }

    /// Human-readable form used in suggestions
    pub fn display_arrow(&self) -> String {
        self.0
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl std::fmt::Display for SectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{}", joined)
    }
}

impl std::str::FromStr for SectionPath {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        if s.is_empty() {
            return Ok(SectionPath::default());
        }

        let segments = s
            .split('/')
            .map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    return Err(ParseError::InvalidSectionPath(s.to_string()));
                }
                Ok(match part.parse::<usize>() {
                    Ok(i) => SectionSegment::Index(i),
                    Err(_) => SectionSegment::Key(part.to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SectionPath(segments))
    }
}

/// A proposed change to a memory document awaiting the user's manual review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySuggestion {
    pub memory_key: MemoryKey,
    #[serde(default, skip_serializing_if = "SectionPath::is_empty")]
    pub section_path: SectionPath,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
