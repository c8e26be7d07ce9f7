//! ArchitectOS reports, one JSON file per cycle

use std::path::PathBuf;

use async_trait::async_trait;

use super::json_file::{read_json, write_json};
use crate::domain::entities::{EvolutionReport, EvolutionReportId};
use crate::domain::ports::EvolutionReportRepository;
use crate::error::DomainError;

pub struct FsEvolutionReportRepository {
    reports_dir: PathBuf,
}

impl FsEvolutionReportRepository {
    pub fn new(reports_dir: PathBuf) -> Self {
        Self { reports_dir }
    }

    fn report_path(&self, id: &EvolutionReportId) -> PathBuf {
        self.reports_dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl EvolutionReportRepository for FsEvolutionReportRepository {
    async fn save(&self, report: &EvolutionReport) -> Result<(), DomainError> {
        write_json(&self.report_path(&report.id), report).await
    }

    async fn get(&self, id: &EvolutionReportId) -> Result<Option<EvolutionReport>, DomainError> {
        read_json(&self.report_path(id)).await
    }

    async fn list(&self) -> Result<Vec<EvolutionReport>, DomainError> {
        let mut dir = match tokio::fs::read_dir(&self.reports_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reports = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_json::<EvolutionReport>(&path).await {
                Ok(Some(report)) => reports.push(report),
                Ok(None) => {}
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable report"),
            }
        }

        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_evolution_report;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn saves_gets_and_lists_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsEvolutionReportRepository::new(tmp.path().join("architect_reports"));
        assert!(repo.list().await.unwrap().is_empty());

        let mut older = test_evolution_report();
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = test_evolution_report();

        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        assert_eq!(repo.get(&older.id).await.unwrap(), Some(older.clone()));
        assert!(repo.get(&EvolutionReportId::new()).await.unwrap().is_none());

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
    }

    #[tokio::test]
    async fn list_skips_foreign_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("architect_reports");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notes.txt"), "not a report").unwrap();
        std::fs::write(dir.join("broken.json"), "{").unwrap();

        let repo = FsEvolutionReportRepository::new(dir);
        repo.save(&test_evolution_report()).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
