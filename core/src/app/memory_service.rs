//! MEMORIES service
//!
//! Read access to the user's structured memories plus a queue of update
//! suggestions. Memories are edited by hand; this service never rewrites
//! an existing document.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::entities::{MemoryKey, MemorySuggestion, SectionPath};
use crate::domain::ports::MemoryRepository;
use crate::error::{AppError, DomainError};

pub struct MemoryService<MR>
where
    MR: MemoryRepository,
{
    repo: Arc<MR>,
    cache: RwLock<HashMap<MemoryKey, Value>>,
}

impl<MR> MemoryService<MR>
where
    MR: MemoryRepository,
{
    pub fn new(repo: Arc<MR>) -> Self {
        Self {
            repo,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create placeholder documents for missing core memories
    pub async fn ensure_core_memories(&self) -> Result<Vec<MemoryKey>, AppError> {
        let mut created = Vec::new();
        for key in MemoryKey::core() {
            if !self.repo.exists(&key).await? {
                self.repo.create(&key, &key.placeholder_document()).await?;
                tracing::info!(memory = %key, path = %self.repo.describe(&key), "created placeholder memory");
                created.push(key);
            }
        }
        Ok(created)
    }

    /// Load a memory, from cache unless `force_reload`
    ///
    /// Missing or unparseable documents yield `None` with a warning.
    pub async fn load_memory(
        &self,
        key: &MemoryKey,
        force_reload: bool,
    ) -> Result<Option<Value>, AppError> {
        if !force_reload {
            if let Some(doc) = self.cache.read().await.get(key) {
                return Ok(Some(doc.clone()));
            }
        }

        let doc = match self.repo.load(key).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::warn!(memory = %key, path = %self.repo.describe(key), "memory file not found");
                return Ok(None);
            }
            Err(DomainError::Parse(e)) => {
                tracing::warn!(memory = %key, error = %e, "could not parse memory");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        self.cache.write().await.insert(key.clone(), doc.clone());
        Ok(Some(doc))
    }

    /// Resolve a section inside a memory; an empty path returns the whole document
    pub async fn get_memory_section(
        &self,
        key: &MemoryKey,
        path: &SectionPath,
    ) -> Result<Option<Value>, AppError> {
        let Some(doc) = self.load_memory(key, false).await? else {
            return Ok(None);
        };
        if path.is_empty() {
            return Ok(Some(doc));
        }

        match path.resolve(&doc) {
            Some(section) => Ok(Some(section.clone())),
            None => {
                tracing::warn!(memory = %key, section = %path, "section path not found in memory");
                Ok(None)
            }
        }
    }

    /// Pretty-printed memory for inclusion in an LLM context
    pub async fn content_for_prompt(&self, key: &MemoryKey) -> Result<String, AppError> {
        match self.load_memory(key, false).await? {
            Some(doc) if !is_blank(&doc) => serde_json::to_string_pretty(&doc)
                .map_err(|e| AppError::Internal(e.to_string())),
            _ => Ok(format!(
                "[Memory content for '{}' could not be loaded or is empty]",
                key
            )),
        }
    }

    /// Queue a change for the user to apply by hand
    pub async fn suggest_memory_update(
        &self,
        key: &MemoryKey,
        description: &str,
        section_path: SectionPath,
    ) -> Result<MemorySuggestion, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::BadRequest(
                "suggested change must not be empty".to_string(),
            ));
        }

        let suggestion = MemorySuggestion {
            memory_key: key.clone(),
            section_path,
            description: description.to_string(),
            created_at: Utc::now(),
        };

        let mut suggestions = self.repo.load_suggestions().await?;
        suggestions.push(suggestion.clone());
        self.repo.save_suggestions(&suggestions).await?;

        tracing::info!(
            memory = %key,
            file = %self.repo.describe(key),
            section = %suggestion.section_path.display_arrow(),
            change = %suggestion.description,
            "memory update suggested"
        );
        Ok(suggestion)
    }

    pub async fn list_suggestions(&self) -> Result<Vec<MemorySuggestion>, AppError> {
        Ok(self.repo.load_suggestions().await?)
    }

    pub fn describe(&self, key: &MemoryKey) -> String {
        self.repo.describe(key)
    }
}

fn is_blank(doc: &Value) -> bool {
    match doc {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
