//! Nomad changelog service

use std::sync::Arc;

use super::clock::Clock;
use crate::domain::entities::{
    next_patch_version, ChangelogEntry, NewChangelogEntry, DEFAULT_NOMAD_VERSION,
};
use crate::domain::ports::ChangelogRepository;
use crate::error::{AppError, DomainError};

pub struct ChangelogService<CR>
where
    CR: ChangelogRepository,
{
    repo: Arc<CR>,
    clock: Clock,
    user_name: String,
}

impl<CR> ChangelogService<CR>
where
    CR: ChangelogRepository,
{
    pub fn new(repo: Arc<CR>, clock: Clock, user_name: String) -> Self {
        Self {
            repo,
            clock,
            user_name,
        }
    }

    async fn load(&self) -> Result<Vec<ChangelogEntry>, AppError> {
        match self.repo.load_all().await {
            Ok(entries) => Ok(entries),
            Err(DomainError::Parse(e)) => {
                tracing::warn!(error = %e, "changelog unreadable, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record a new version at the head of the changelog
    pub async fn add_entry(&self, new: NewChangelogEntry) -> Result<ChangelogEntry, AppError> {
        if new.version.trim().is_empty() {
            return Err(AppError::BadRequest("version must not be empty".to_string()));
        }
        if new.summary.trim().is_empty() {
            return Err(AppError::BadRequest("summary must not be empty".to_string()));
        }

        let entry = ChangelogEntry {
            version: new.version.trim().to_string(),
            date: new.date,
            summary: new.summary.trim().to_string(),
            impacted_modules: new.impacted_modules,
            files_updated_by_tan: new.files_updated,
            timestamp: self.clock.now().to_rfc3339(),
        };

        let mut entries = self.load().await?;
        entries.insert(0, entry.clone());
        self.repo.save_all(&entries).await?;

        tracing::info!(version = %entry.version, "new entry added to Nomad changelog");
        Ok(entry)
    }

    /// Newest version, or the initial version for an empty changelog
    pub async fn latest_version(&self) -> Result<String, AppError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .next()
            .map(|e| e.version)
            .unwrap_or_else(|| DEFAULT_NOMAD_VERSION.to_string()))
    }

    pub async fn entries(&self, limit: usize) -> Result<Vec<ChangelogEntry>, AppError> {
        let mut entries = self.load().await?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// Today's date as recorded on new entries
    pub fn today(&self) -> String {
        self.clock.date_string()
    }

    /// Draft the one-line entry text for the next patch version
    pub fn draft_entry_text(
        &self,
        current_version: &str,
        summary: &str,
        impacted_modules: &[String],
        files_to_update: &[String],
    ) -> String {
        let next_version = next_patch_version(current_version).unwrap_or_else(|| {
            tracing::warn!(version = current_version, "could not parse version for increment, using fallback");
            format!("{}-next", current_version)
        });

        let modules = if impacted_modules.is_empty() {
            "N/A".to_string()
        } else {
            impacted_modules.join(", ")
        };
        let files = if files_to_update.is_empty() {
            "relevant prompts/memories".to_string()
        } else {
            files_to_update.join(", ")
        };

        format!(
            "**Version {} ({}):** Learned/Refined: {}. Impacted Modules: {}. Action: {} updated {}.",
            next_version,
            self.today(),
            summary,
            modules,
            self.user_name,
            files
        )
    }
}
