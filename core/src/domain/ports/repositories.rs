//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., JSON files on disk).

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::{
    CaptainsLogState, ChangelogEntry, EvolutionReport, EvolutionReportId, HealthLogEntry,
    MemoryKey, MemorySuggestion,
};
use crate::error::DomainError;

/// Repository for the Captain's Log state and health history
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Load the persisted state, `None` if nothing has been saved yet
    async fn load(&self) -> Result<Option<CaptainsLogState>, DomainError>;

    /// Persist the state
    async fn save(&self, state: &CaptainsLogState) -> Result<(), DomainError>;

    /// Load the health history, oldest first
    async fn load_health_log(&self) -> Result<Vec<HealthLogEntry>, DomainError>;

    /// Replace the health history
    async fn save_health_log(&self, entries: &[HealthLogEntry]) -> Result<(), DomainError>;
}

/// Repository for MEMORIES documents and pending update suggestions
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Load a memory document, `None` if it doesn't exist
    async fn load(&self, key: &MemoryKey) -> Result<Option<Value>, DomainError>;

    /// Check whether a memory document exists
    async fn exists(&self, key: &MemoryKey) -> Result<bool, DomainError>;

    /// Create a memory document
    async fn create(&self, key: &MemoryKey, document: &Value) -> Result<(), DomainError>;

    /// Where the document lives, for display in prompts and messages
    fn describe(&self, key: &MemoryKey) -> String;

    /// Load pending suggestions, oldest first
    async fn load_suggestions(&self) -> Result<Vec<MemorySuggestion>, DomainError>;

    /// Replace pending suggestions
    async fn save_suggestions(&self, suggestions: &[MemorySuggestion]) -> Result<(), DomainError>;
}

/// Repository for the Nomad changelog
#[async_trait]
pub trait ChangelogRepository: Send + Sync {
    /// Load all entries, newest first
    async fn load_all(&self) -> Result<Vec<ChangelogEntry>, DomainError>;

    /// Replace all entries (newest first)
    async fn save_all(&self, entries: &[ChangelogEntry]) -> Result<(), DomainError>;
}

/// Repository for module and tool prompt files
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Read `<module_dir>/<file>`, `None` if it doesn't exist
    async fn read(&self, module_dir: &str, file: &str) -> Result<Option<String>, DomainError>;

    /// Write a prompt only when absent; returns whether it was written
    async fn write_if_missing(
        &self,
        module_dir: &str,
        file: &str,
        content: &str,
    ) -> Result<bool, DomainError>;

    /// Where the prompt lives, for display in messages
    fn describe(&self, module_dir: &str, file: &str) -> String;
}

/// Repository for ArchitectOS evolution reports
#[async_trait]
pub trait EvolutionReportRepository: Send + Sync {
    /// Persist a report
    async fn save(&self, report: &EvolutionReport) -> Result<(), DomainError>;

    /// Get a report by ID
    async fn get(&self, id: &EvolutionReportId) -> Result<Option<EvolutionReport>, DomainError>;

    /// List all reports, newest first
    async fn list(&self) -> Result<Vec<EvolutionReport>, DomainError>;
}
