//! Nomad changelog persisted as a JSON array, newest first

use std::path::PathBuf;

use async_trait::async_trait;

use super::json_file::{read_json, write_json};
use crate::domain::entities::ChangelogEntry;
use crate::domain::ports::ChangelogRepository;
use crate::error::DomainError;

pub struct FsChangelogRepository {
    changelog_file: PathBuf,
}

impl FsChangelogRepository {
    pub fn new(changelog_file: PathBuf) -> Self {
        Self { changelog_file }
    }
}

#[async_trait]
impl ChangelogRepository for FsChangelogRepository {
    async fn load_all(&self) -> Result<Vec<ChangelogEntry>, DomainError> {
        Ok(read_json(&self.changelog_file).await?.unwrap_or_default())
    }

    async fn save_all(&self, entries: &[ChangelogEntry]) -> Result<(), DomainError> {
        write_json(&self.changelog_file, &entries).await?;
        tracing::debug!(path = %self.changelog_file.display(), "Nomad changelog saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str) -> ChangelogEntry {
        ChangelogEntry {
            version: version.to_string(),
            date: "2025-05-16".to_string(),
            summary: "Outline first".to_string(),
            impacted_modules: vec!["ChartRoom".to_string()],
            files_updated_by_tan: vec!["ChartRoom/Planning_Module_Prompt.txt".to_string()],
            timestamp: "2025-05-16T10:00:00+01:00".to_string(),
        }
    }

    #[tokio::test]
    async fn round_trips_entries_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsChangelogRepository::new(tmp.path().join("changelogs/nomad_changelog.json"));
        assert!(repo.load_all().await.unwrap().is_empty());

        repo.save_all(&[entry("0.3.2"), entry("0.3.1")])
            .await
            .unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].version, "0.3.2");
        assert_eq!(loaded[1].files_updated_by_tan.len(), 1);
    }
}
