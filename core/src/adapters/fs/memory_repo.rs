//! MEMORIES documents on disk
//!
//! A key maps to `<memories>/<key>.json`, falling back to `.yaml` and `.yml`.
//! New documents are always written as JSON.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::json_file::{read_json, write_json};
use crate::domain::entities::{MemoryKey, MemorySuggestion};
use crate::domain::ports::MemoryRepository;
use crate::error::DomainError;

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

pub struct FsMemoryRepository {
    memories_dir: PathBuf,
    suggestions_file: PathBuf,
}

impl FsMemoryRepository {
    pub fn new(memories_dir: PathBuf, suggestions_file: PathBuf) -> Self {
        Self {
            memories_dir,
            suggestions_file,
        }
    }

    fn json_path(&self, key: &MemoryKey) -> PathBuf {
        self.memories_dir.join(format!("{}.json", key))
    }

    /// First existing file for the key, in extension priority order
    fn existing_path(&self, key: &MemoryKey) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.memories_dir.join(format!("{}.{}", key, ext)))
            .find(|p| p.is_file())
    }
}

async fn parse_document(path: &Path) -> Result<Value, DomainError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to read {}: {}", path.display(), e)))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let parsed = if is_yaml {
        serde_yaml::from_str::<Value>(&raw).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Value>(&raw).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| DomainError::Parse(format!("{}: {}", path.display(), e)))
}

#[async_trait]
impl MemoryRepository for FsMemoryRepository {
    async fn load(&self, key: &MemoryKey) -> Result<Option<Value>, DomainError> {
        match self.existing_path(key) {
            Some(path) => {
                let doc = parse_document(&path).await?;
                tracing::debug!(memory = %key, path = %path.display(), "loaded memory");
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, key: &MemoryKey) -> Result<bool, DomainError> {
        Ok(self.existing_path(key).is_some())
    }

    async fn create(&self, key: &MemoryKey, document: &Value) -> Result<(), DomainError> {
        write_json(&self.json_path(key), document).await
    }

    fn describe(&self, key: &MemoryKey) -> String {
        self.existing_path(key)
            .unwrap_or_else(|| self.json_path(key))
            .display()
            .to_string()
    }

    async fn load_suggestions(&self) -> Result<Vec<MemorySuggestion>, DomainError> {
        Ok(read_json(&self.suggestions_file).await?.unwrap_or_default())
    }

    async fn save_suggestions(&self, suggestions: &[MemorySuggestion]) -> Result<(), DomainError> {
        write_json(&self.suggestions_file, &suggestions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo(dir: &Path) -> FsMemoryRepository {
        FsMemoryRepository::new(dir.join("memories"), dir.join("suggestions.json"))
    }

    fn key(k: &str) -> MemoryKey {
        MemoryKey::parse(k).unwrap()
    }

    #[tokio::test]
    async fn creates_and_loads_json() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo(tmp.path());
        let k = key("tan_core_identity_values");

        assert!(!repo.exists(&k).await.unwrap());
        repo.create(&k, &json!({"Core Values": ["Freedom"]}))
            .await
            .unwrap();

        assert!(repo.exists(&k).await.unwrap());
        assert_eq!(
            repo.load(&k).await.unwrap(),
            Some(json!({"Core Values": ["Freedom"]}))
        );
        assert!(repo.describe(&k).ends_with("tan_core_identity_values.json"));
    }

    #[tokio::test]
    async fn loads_yaml_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo(tmp.path());
        let dir = tmp.path().join("memories");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("travel.yml"),
            "Favourite Cities:\n  - Lisbon\n  - Kyoto\nversion: '1.1'\n",
        )
        .unwrap();

        let doc = repo.load(&key("travel")).await.unwrap().unwrap();
        assert_eq!(doc["Favourite Cities"][1], json!("Kyoto"));
        assert_eq!(doc["version"], json!("1.1"));
        assert!(repo.describe(&key("travel")).ends_with("travel.yml"));
    }

    #[tokio::test]
    async fn json_takes_priority_over_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo(tmp.path());
        let dir = tmp.path().join("memories");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notes.json"), r#"{"from": "json"}"#).unwrap();
        std::fs::write(dir.join("notes.yaml"), "from: yaml\n").unwrap();

        let doc = repo.load(&key("notes")).await.unwrap().unwrap();
        assert_eq!(doc["from"], json!("json"));
    }

    #[tokio::test]
    async fn malformed_document_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo(tmp.path());
        let dir = tmp.path().join("memories");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("broken.json"), "{").unwrap();

        assert!(matches!(
            repo.load(&key("broken")).await,
            Err(DomainError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn missing_memory_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(repo(tmp.path())
            .load(&key("absent"))
            .await
            .unwrap()
            .is_none());
    }
}
