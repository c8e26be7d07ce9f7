//! Captain's Log state persisted as JSON

use std::path::PathBuf;

use async_trait::async_trait;

use super::json_file::{read_json, write_json};
use crate::domain::entities::{CaptainsLogState, HealthLogEntry};
use crate::domain::ports::StateRepository;
use crate::error::DomainError;

pub struct FsStateRepository {
    state_file: PathBuf,
    health_log_file: PathBuf,
}

impl FsStateRepository {
    pub fn new(state_file: PathBuf, health_log_file: PathBuf) -> Self {
        Self {
            state_file,
            health_log_file,
        }
    }
}

#[async_trait]
impl StateRepository for FsStateRepository {
    async fn load(&self) -> Result<Option<CaptainsLogState>, DomainError> {
        let state = read_json(&self.state_file).await?;
        if state.is_some() {
            tracing::debug!(path = %self.state_file.display(), "loaded Captain's Log state");
        }
        Ok(state)
    }

    async fn save(&self, state: &CaptainsLogState) -> Result<(), DomainError> {
        write_json(&self.state_file, state).await?;
        tracing::debug!(path = %self.state_file.display(), "Captain's Log state saved");
        Ok(())
    }

    async fn load_health_log(&self) -> Result<Vec<HealthLogEntry>, DomainError> {
        Ok(read_json(&self.health_log_file).await?.unwrap_or_default())
    }

    async fn save_health_log(&self, entries: &[HealthLogEntry]) -> Result<(), DomainError> {
        write_json(&self.health_log_file, &entries).await
    }
}
