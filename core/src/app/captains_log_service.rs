//! Captain's Log service
//!
//! Owns the operational state: location, mood/energy, health flags, active
//! projects, recent insights, pending decisions and the Nomad version.
//! Every read refreshes `current_date_time`; every mutation is saved.

use std::sync::Arc;

use serde_json::Value;

use super::clock::Clock;
use crate::domain::entities::{ActiveProject, CaptainsLogState, Insight, PendingDecision};
use crate::domain::ports::StateRepository;
use crate::error::{AppError, DomainError};

pub struct CaptainsLogService<SR>
where
    SR: StateRepository,
{
    repo: Arc<SR>,
    clock: Clock,
    user_name: String,
}

impl<SR> CaptainsLogService<SR>
where
    SR: StateRepository,
{
    pub fn new(repo: Arc<SR>, clock: Clock, user_name: String) -> Self {
        Self {
            repo,
            clock,
            user_name,
        }
    }

    /// Load the persisted state, or start fresh when it is missing or unreadable
    pub async fn load_or_initialize(&self) -> Result<CaptainsLogState, AppError> {
        let mut state = match self.repo.load().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!("initializing new Captain's Log state");
                CaptainsLogState::initial(String::new())
            }
            Err(DomainError::Parse(e)) => {
                tracing::warn!(error = %e, "Captain's Log state unreadable, initializing new state");
                CaptainsLogState::initial(String::new())
            }
            Err(e) => return Err(e.into()),
        };
        state.current_date_time = self.clock.timestamp_string();
        Ok(state)
    }

    /// Current state with a fresh timestamp
    pub async fn state(&self) -> Result<CaptainsLogState, AppError> {
        self.load_or_initialize().await
    }

    pub async fn save(&self, state: &mut CaptainsLogState) -> Result<(), AppError> {
        state.current_date_time = self.clock.timestamp_string();
        self.repo.save(state).await?;
        Ok(())
    }

    /// Load, apply `f`, save and return the new state
    pub async fn update<F>(&self, f: F) -> Result<CaptainsLogState, AppError>
    where
        F: FnOnce(&mut CaptainsLogState),
    {
        let mut state = self.load_or_initialize().await?;
        f(&mut state);
        self.save(&mut state).await?;
        Ok(state)
    }

    /// Set any top-level state variable by its persisted name
    ///
    /// Returns `false` when the key is managed automatically and was ignored.
    pub async fn update_state_variable(&self, key: &str, value: Value) -> Result<bool, AppError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::BadRequest("state key must not be empty".to_string()));
        }
        if key == "current_date_time" {
            tracing::warn!("current_date_time is updated automatically, manual update ignored");
            return Ok(false);
        }

        let state = self.load_or_initialize().await?;
        let mut raw = match serde_json::to_value(&state) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(AppError::Internal(
                    "Captain's Log state did not serialize to an object".to_string(),
                ))
            }
            Err(e) => return Err(AppError::Internal(e.to_string())),
        };
        raw.insert(key.to_string(), value.clone());

        let mut updated: CaptainsLogState = serde_json::from_value(Value::Object(raw))
            .map_err(|e| DomainError::Validation(format!("invalid value for '{}': {}", key, e)))?;
        self.save(&mut updated).await?;

        tracing::info!(key, value = %value, "Captain's Log state updated");
        Ok(true)
    }

    pub async fn add_active_project(
        &self,
        name: &str,
        status: &str,
        milestone: &str,
        next_step: &str,
    ) -> Result<CaptainsLogState, AppError> {
        let name = required("project name", name)?;
        let project = ActiveProject {
            status: status.to_string(),
            milestone: milestone.to_string(),
            next_step: next_step.to_string(),
        };
        let state = self
            .update(|s| {
                s.active_projects.insert(name.clone(), project);
            })
            .await?;
        tracing::info!(project = %name, "project added/updated in Captain's Log");
        Ok(state)
    }

    pub async fn add_insight(&self, summary: &str) -> Result<CaptainsLogState, AppError> {
        let summary = required("insight", summary)?;
        let insight = Insight {
            summary: summary.clone(),
            date: self.clock.date_string(),
        };
        let state = self.update(|s| s.push_insight(insight)).await?;
        tracing::info!(insight = %summary, "insight added to Captain's Log");
        Ok(state)
    }

    pub async fn add_pending_decision(
        &self,
        name: &str,
        transformative: bool,
    ) -> Result<CaptainsLogState, AppError> {
        let name = required("decision name", name)?;
        self.update(|s| {
            s.pending_decisions.insert(
                name,
                PendingDecision {
                    transformative_flag: transformative,
                },
            );
        })
        .await
    }

    pub async fn update_nomad_version(&self, version: &str) -> Result<CaptainsLogState, AppError> {
        let version = required("version", version)?;
        self.update(|s| s.nomad_version = version).await
    }

    pub async fn set_location(&self, location: &str) -> Result<CaptainsLogState, AppError> {
        let location = required("location", location)?;
        self.update(|s| s.current_location = location).await
    }

    pub async fn set_mood_energy(&self, summary: &str) -> Result<CaptainsLogState, AppError> {
        let summary = required("mood/energy summary", summary)?;
        self.update(|s| s.mood_energy_summary = summary).await
    }

    /// The snapshot block placed at the top of every LLM context
    pub async fn formatted_state_for_prompt(&self) -> Result<String, AppError> {
        let state = self.state().await?;
        Ok(format_state(&state, &self.user_name))
    }
}

fn required(what: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", what)));
    }
    Ok(value.to_string())
}

pub fn format_state(state: &CaptainsLogState, user_name: &str) -> String {
    let mut out = format!(
        "Operational State Snapshot (as of {}):\n\
         - {user}'s Location: {}\n\
         - {user}'s Reported Mood/Energy: {}\n\
         - Health Metric Flags: {}\n\
         - Nomad Conceptual Version: {}\n\
         \n\
         Active Projects & Focus:\n",
        state.current_date_time,
        state.current_location,
        state.mood_energy_summary,
        state.health_metric_flags,
        state.nomad_version,
        user = user_name,
    );

    if state.active_projects.is_empty() {
        out.push_str("- No active projects listed.\n");
    }
    for (name, project) in &state.active_projects {
        out.push_str(&format!("  - Project: {}\n", name));
        out.push_str(&format!("    Status: {}\n", or_na(&project.status)));
        out.push_str(&format!("    Current Milestone: {}\n", or_na(&project.milestone)));
        out.push_str(&format!("    Next Concrete Step: {}\n", or_na(&project.next_step)));
    }

    out.push_str("\nRecent Key Insights/Reflections:\n");
    if state.recent_key_insights.is_empty() {
        out.push_str("- No recent insights logged.\n");
    }
    for insight in &state.recent_key_insights {
        out.push_str(&format!("  - ({}) {}\n", or_na(&insight.date), insight.summary));
    }

    out.push_str("\nPending Decisions:\n");
    if state.pending_decisions.is_empty() {
        out.push_str("- No pending decisions listed.\n");
    }
    for (name, decision) in &state.pending_decisions {
        let flag = if decision.transformative_flag { "YES" } else { "NO" };
        out.push_str(&format!("  - Decision: {} (Transformative: {})\n", name, flag));
    }

    out.trim().to_string()
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MAX_RECENT_INSIGHTS;
    use crate::test_utils::{test_offset, test_state, InMemoryStateRepository};
    use serde_json::json;

    fn create_service(
        repo: InMemoryStateRepository,
    ) -> (
        CaptainsLogService<InMemoryStateRepository>,
        Arc<InMemoryStateRepository>,
    ) {
        let repo = Arc::new(repo);
        let service = CaptainsLogService::new(
            repo.clone(),
            Clock::new(test_offset()),
            "Tan".to_string(),
        );
        (service, repo)
    }

    #[tokio::test]
    async fn initializes_default_state() {
        let (service, repo) = create_service(InMemoryStateRepository::new());

        let state = service.load_or_initialize().await.unwrap();

        assert_eq!(state.current_location, "Barcelona, Catalonia, Spain");
        assert_eq!(state.nomad_version, "0.3");
        assert!(state.current_date_time.ends_with("+01:00"));
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn corrupt_state_falls_back_to_default() {
        let (service, _) = create_service(InMemoryStateRepository::new().corrupt());
        let state = service.load_or_initialize().await.unwrap();
        assert!(state.active_projects.is_empty());
    }

    #[tokio::test]
    async fn read_refreshes_timestamp() {
        let (service, _) = create_service(InMemoryStateRepository::new().with_state(test_state()));
        let state = service.state().await.unwrap();
        assert_ne!(state.current_date_time, "2025-05-16 09:00:00 +01:00");
        assert_eq!(state.active_projects.len(), 1);
    }

    #[tokio::test]
    async fn update_state_variable_sets_known_and_custom_keys() {
        let (service, repo) = create_service(InMemoryStateRepository::new());

        assert!(service
            .update_state_variable("tan_mood_energy_summary", json!("Focused, Energy 7/10"))
            .await
            .unwrap());
        assert!(service
            .update_state_variable("tan_timezone", json!("Europe/Madrid"))
            .await
            .unwrap());

        let stored = repo.stored().unwrap();
        assert_eq!(stored.mood_energy_summary, "Focused, Energy 7/10");
        assert_eq!(stored.extra.get("tan_timezone"), Some(&json!("Europe/Madrid")));
        assert_eq!(repo.save_count(), 2);
    }

    #[tokio::test]
    async fn update_state_variable_ignores_timestamp() {
        let (service, repo) = create_service(InMemoryStateRepository::new());
        let applied = service
            .update_state_variable("current_date_time", json!("yesterday"))
            .await
            .unwrap();
        assert!(!applied);
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn update_state_variable_rejects_wrong_type() {
        let (service, repo) = create_service(InMemoryStateRepository::new());
        let result = service
            .update_state_variable("active_projects", json!("not a map"))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
        assert!(repo.stored().is_none());
    }

    #[tokio::test]
    async fn insights_are_newest_first_and_capped() {
        let (service, repo) = create_service(InMemoryStateRepository::new());
        for i in 0..7 {
            service.add_insight(&format!("insight {}", i)).await.unwrap();
        }

        let stored = repo.stored().unwrap();
        assert_eq!(stored.recent_key_insights.len(), MAX_RECENT_INSIGHTS);
        assert_eq!(stored.recent_key_insights[0].summary, "insight 6");
        assert_eq!(
            stored.recent_key_insights[0].date,
            Clock::new(test_offset()).date_string()
        );
    }

    #[tokio::test]
    async fn add_project_replaces_existing() {
        let (service, repo) = create_service(InMemoryStateRepository::new().with_state(test_state()));
        service
            .add_active_project("TanOS App Dev", "Done", "Release", "Celebrate")
            .await
            .unwrap();
        let stored = repo.stored().unwrap();
        assert_eq!(stored.active_projects.len(), 1);
        assert_eq!(stored.active_projects["TanOS App Dev"].status, "Done");
    }

    #[tokio::test]
    async fn blank_inputs_are_rejected() {
        let (service, _) = create_service(InMemoryStateRepository::new());
        assert!(matches!(
            service.add_insight("  ").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(service.set_location("").await.is_err());
        assert!(service.add_pending_decision("", true).await.is_err());
    }

    #[test]
    fn formats_empty_state() {
        let state = CaptainsLogState::initial("2025-05-16 09:00:00 +01:00".to_string());
        let text = format_state(&state, "Tan");

        assert!(text.starts_with("Operational State Snapshot (as of 2025-05-16 09:00:00 +01:00):"));
        assert!(text.contains("- Tan's Location: Barcelona, Catalonia, Spain"));
        assert!(text.contains("- Tan's Reported Mood/Energy: Neutral, Energy 5/10 (Initial State)"));
        assert!(text.contains("- No active projects listed."));
        assert!(text.contains("- No recent insights logged."));
        assert!(text.ends_with("- No pending decisions listed."));
    }

    #[test]
    fn formats_projects_insights_and_decisions() {
        let mut state = test_state();
        state.push_insight(Insight {
            summary: "Structured memories matter".to_string(),
            date: "2025-05-16".to_string(),
        });
        state.pending_decisions.insert(
            "Move to Lisbon".to_string(),
            PendingDecision {
                transformative_flag: true,
            },
        );

        let text = format_state(&state, "Ana");

        assert!(text.contains("- Ana's Location:"));
        assert!(text.contains(
            "  - Project: TanOS App Dev\n    Status: In Progress\n    Current Milestone: Core Module Implementation\n    Next Concrete Step: Implement MemoryManager\n"
        ));
        assert!(text.contains("  - (2025-05-16) Structured memories matter"));
        assert!(text.ends_with("- Decision: Move to Lisbon (Transformative: YES)"));
    }
}
