//! Mock implementations of port traits
//!
//! In-memory repositories and a recording LLM client. Tests can pre-populate
//! them and inspect what the services wrote or sent.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    CaptainsLogState, ChangelogEntry, EvolutionReport, EvolutionReportId, HealthLogEntry,
    MemoryKey, MemorySuggestion,
};
use crate::domain::ports::{
    ChangelogRepository, EvolutionReportRepository, LlmClient, LlmRequest, MemoryRepository,
    PromptRepository, StateRepository,
};
use crate::error::{DomainError, LlmError};

// ============================================================================
// In-Memory State Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryStateRepository {
    state: Arc<RwLock<Option<CaptainsLogState>>>,
    health_log: Arc<RwLock<Vec<HealthLogEntry>>>,
    corrupt: bool,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(self, state: CaptainsLogState) -> Self {
        *self.state.write().unwrap() = Some(state);
        self
    }

    pub fn with_health_log(self, entries: Vec<HealthLogEntry>) -> Self {
        *self.health_log.write().unwrap() = entries;
        self
    }

    /// Simulate an unreadable state file
    pub fn corrupt(mut self) -> Self {
        self.corrupt = true;
        self
    }

    pub fn stored(&self) -> Option<CaptainsLogState> {
        self.state.read().unwrap().clone()
    }

    pub fn stored_health_log(&self) -> Vec<HealthLogEntry> {
        self.health_log.read().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.read().unwrap()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn load(&self) -> Result<Option<CaptainsLogState>, DomainError> {
        if self.corrupt && self.state.read().unwrap().is_none() {
            return Err(DomainError::Parse("expected value at line 1".to_string()));
        }
        Ok(self.state.read().unwrap().clone())
    }

    async fn save(&self, state: &CaptainsLogState) -> Result<(), DomainError> {
        *self.state.write().unwrap() = Some(state.clone());
        *self.saves.write().unwrap() += 1;
        Ok(())
    }

    async fn load_health_log(&self) -> Result<Vec<HealthLogEntry>, DomainError> {
        Ok(self.health_log.read().unwrap().clone())
    }

    async fn save_health_log(&self, entries: &[HealthLogEntry]) -> Result<(), DomainError> {
        *self.health_log.write().unwrap() = entries.to_vec();
        Ok(())
    }
}

// ============================================================================
// In-Memory Memory Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryMemoryRepository {
    documents: Arc<RwLock<HashMap<MemoryKey, Value>>>,
    suggestions: Arc<RwLock<Vec<MemorySuggestion>>>,
    loads: Arc<RwLock<usize>>,
}

impl InMemoryMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory(self, key: &str, document: Value) -> Self {
        if let Ok(key) = MemoryKey::parse(key) {
            self.documents.write().unwrap().insert(key, document);
        }
        self
    }

    pub fn stored_suggestions(&self) -> Vec<MemorySuggestion> {
        self.suggestions.read().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        *self.loads.read().unwrap()
    }

    /// Replace a document behind the service's back
    pub fn overwrite(&self, key: &str, document: Value) {
        if let Ok(key) = MemoryKey::parse(key) {
            self.documents.write().unwrap().insert(key, document);
        }
    }
}

#[async_trait]
impl MemoryRepository for InMemoryMemoryRepository {
    async fn load(&self, key: &MemoryKey) -> Result<Option<Value>, DomainError> {
        *self.loads.write().unwrap() += 1;
        Ok(self.documents.read().unwrap().get(key).cloned())
    }

    async fn exists(&self, key: &MemoryKey) -> Result<bool, DomainError> {
        Ok(self.documents.read().unwrap().contains_key(key))
    }

    async fn create(&self, key: &MemoryKey, document: &Value) -> Result<(), DomainError> {
        self.documents
            .write()
            .unwrap()
            .insert(key.clone(), document.clone());
        Ok(())
    }

    fn describe(&self, key: &MemoryKey) -> String {
        format!("memories/{}.json", key)
    }

    async fn load_suggestions(&self) -> Result<Vec<MemorySuggestion>, DomainError> {
        Ok(self.suggestions.read().unwrap().clone())
    }

    async fn save_suggestions(&self, suggestions: &[MemorySuggestion]) -> Result<(), DomainError> {
        *self.suggestions.write().unwrap() = suggestions.to_vec();
        Ok(())
    }
}

// ============================================================================
// In-Memory Changelog Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryChangelogRepository {
    entries: Arc<RwLock<Vec<ChangelogEntry>>>,
    corrupt: bool,
}

impl InMemoryChangelogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(self, entries: Vec<ChangelogEntry>) -> Self {
        *self.entries.write().unwrap() = entries;
        self
    }

    pub fn corrupt(mut self) -> Self {
        self.corrupt = true;
        self
    }

    pub fn stored(&self) -> Vec<ChangelogEntry> {
        self.entries.read().unwrap().clone()
    }
}

#[async_trait]
impl ChangelogRepository for InMemoryChangelogRepository {
    async fn load_all(&self) -> Result<Vec<ChangelogEntry>, DomainError> {
        if self.corrupt {
            return Err(DomainError::Parse("trailing comma at line 3".to_string()));
        }
        Ok(self.entries.read().unwrap().clone())
    }

    async fn save_all(&self, entries: &[ChangelogEntry]) -> Result<(), DomainError> {
        *self.entries.write().unwrap() = entries.to_vec();
        Ok(())
    }
}

// ============================================================================
// In-Memory Prompt Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPromptRepository {
    prompts: Arc<RwLock<HashMap<String, String>>>,
    reads: Arc<RwLock<usize>>,
}

impl InMemoryPromptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(self, module_dir: &str, file: &str, content: &str) -> Self {
        self.prompts
            .write()
            .unwrap()
            .insert(format!("{}/{}", module_dir, file), content.to_string());
        self
    }

    pub fn stored(&self, module_dir: &str, file: &str) -> Option<String> {
        self.prompts
            .read()
            .unwrap()
            .get(&format!("{}/{}", module_dir, file))
            .cloned()
    }

    pub fn read_count(&self) -> usize {
        *self.reads.read().unwrap()
    }
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepository {
    async fn read(&self, module_dir: &str, file: &str) -> Result<Option<String>, DomainError> {
        *self.reads.write().unwrap() += 1;
        Ok(self.stored(module_dir, file))
    }

    async fn write_if_missing(
        &self,
        module_dir: &str,
        file: &str,
        content: &str,
    ) -> Result<bool, DomainError> {
        let mut prompts = self.prompts.write().unwrap();
        let key = format!("{}/{}", module_dir, file);
        if prompts.contains_key(&key) {
            return Ok(false);
        }
        prompts.insert(key, content.to_string());
        Ok(true)
    }

    fn describe(&self, module_dir: &str, file: &str) -> String {
        format!("tanos_prompts/{}/{}", module_dir, file)
    }
}

// ============================================================================
// In-Memory Evolution Report Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryEvolutionReportRepository {
    reports: Arc<RwLock<HashMap<EvolutionReportId, EvolutionReport>>>,
}

impl InMemoryEvolutionReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(self, report: EvolutionReport) -> Self {
        self.reports.write().unwrap().insert(report.id, report);
        self
    }

    pub fn count(&self) -> usize {
        self.reports.read().unwrap().len()
    }
}

#[async_trait]
impl EvolutionReportRepository for InMemoryEvolutionReportRepository {
    async fn save(&self, report: &EvolutionReport) -> Result<(), DomainError> {
        self.reports
            .write()
            .unwrap()
            .insert(report.id, report.clone());
        Ok(())
    }

    async fn get(&self, id: &EvolutionReportId) -> Result<Option<EvolutionReport>, DomainError> {
        Ok(self.reports.read().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<EvolutionReport>, DomainError> {
        let mut reports: Vec<_> = self.reports.read().unwrap().values().cloned().collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

// ============================================================================
// Recording LLM Client
// ============================================================================

/// Records every request; answers from a script, then with a canned echo
#[derive(Default)]
pub struct RecordingLlmClient {
    requests: Arc<RwLock<Vec<LlmRequest>>>,
    scripted: Arc<RwLock<VecDeque<String>>>,
    fail_with_status: Option<u16>,
}

impl RecordingLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue responses returned in order before falling back to the echo
    pub fn with_responses(self, responses: &[&str]) -> Self {
        self.scripted
            .write()
            .unwrap()
            .extend(responses.iter().map(|r| r.to_string()));
        self
    }

    /// Every call fails with an API error of this status
    pub fn failing(mut self, status: u16) -> Self {
        self.fail_with_status = Some(status);
        self
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<LlmRequest> {
        self.requests.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for RecordingLlmClient {
    fn provider(&self) -> &str {
        "recording"
    }

    async fn send_prompt(&self, request: &LlmRequest) -> Result<String, LlmError> {
        self.requests.write().unwrap().push(request.clone());

        if let Some(status) = self.fail_with_status {
            return Err(LlmError::Api {
                status,
                message: "upstream unavailable".to_string(),
            });
        }

        let scripted = self.scripted.write().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| format!("echo: {}", request.user_prompt)))
    }
}
