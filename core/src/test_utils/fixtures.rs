//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{FixedOffset, NaiveDate, Utc};
use serde_json::{json, Value};

use crate::config::HealthThresholds;
use crate::domain::entities::{
    ActiveProject, CaptainsLogState, ChangelogEntry, DietStatus, EvolutionReport,
    EvolutionReportId, HealthLogEntry, HealthReport, SupplementStatus, TanosModule,
};

/// Offset used by service tests
pub fn test_offset() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

pub fn test_thresholds() -> HealthThresholds {
    HealthThresholds::default()
}

/// A state with one project, as a returning user would have
pub fn test_state() -> CaptainsLogState {
    let mut state = CaptainsLogState::initial("2025-05-16 09:00:00 +01:00".to_string());
    state.active_projects.insert(
        "TanOS App Dev".to_string(),
        ActiveProject {
            status: "In Progress".to_string(),
            milestone: "Core Module Implementation".to_string(),
            next_step: "Implement MemoryManager".to_string(),
        },
    );
    state
}

/// A full morning check-in
pub fn test_health_report() -> HealthReport {
    HealthReport {
        sleep_quality: Some(7.0),
        sleep_hours: Some(7.5),
        hrv: Some(52),
        rhr: Some(58),
        am_supps: Some(SupplementStatus::Yes),
        diet_track: Some(DietStatus::On),
        mood: Some("Spring Neutral".to_string()),
        energy: Some(6),
        ..Default::default()
    }
}

/// History entry for a given day with only HRV and sleep quality set
pub fn health_entry(date: NaiveDate, hrv: Option<u32>, sleep_quality: Option<f32>) -> HealthLogEntry {
    HealthLogEntry {
        date,
        logged_at: Utc::now(),
        report: HealthReport {
            hrv,
            sleep_quality,
            ..Default::default()
        },
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn test_changelog_entry(version: &str) -> ChangelogEntry {
    ChangelogEntry {
        version: version.to_string(),
        date: "2025-05-16".to_string(),
        summary: "Tan's 'good enough' clarity for new projects involves a 1-page outline".to_string(),
        impacted_modules: vec!["ChartRoom".to_string()],
        files_updated_by_tan: vec!["ChartRoom/Planning_Module_Prompt.txt".to_string()],
        timestamp: "2025-05-16T10:00:00+01:00".to_string(),
    }
}

pub fn test_evolution_report() -> EvolutionReport {
    EvolutionReport {
        id: EvolutionReportId::new(),
        created_at: Utc::now(),
        objective: "Improve handling of vague goals".to_string(),
        module: TanosModule::ChartRoom,
        prompt_file: "Planning_Module_Prompt.txt".to_string(),
        generator_proposals: "G1: Fog map. G2: Compass questions.".to_string(),
        critic_notes: "G1 scores 8/10 for novelty.".to_string(),
        evolved_suggestions: "M1: Lighthouse prompt.".to_string(),
        suggested_next_cycle: "Review mutated variants.".to_string(),
        proposal_labels: vec!["G1".to_string(), "G2".to_string()],
        variant_labels: vec!["M1".to_string()],
    }
}

pub fn test_memory_document() -> Value {
    json!({
        "Core Values": {
            "Freedom": "Location independence",
            "Growth": ["Daily reflection", "Deliberate practice"]
        },
        "version": "1.0"
    })
}
