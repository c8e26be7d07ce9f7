//! Captain's Log operational state
//!
//! The dynamic state Nomad carries between interactions: clock, location,
//! mood/energy, health flags, projects, insights, decisions and version.
//! Field names match the persisted `captains_log_state.json` layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::changelog::DEFAULT_NOMAD_VERSION;

/// Maximum insights kept in `recent_key_insights`
pub const MAX_RECENT_INSIGHTS: usize = 5;

pub const DEFAULT_LOCATION: &str = "Barcelona, Catalonia, Spain";
pub const DEFAULT_MOOD_ENERGY: &str = "Neutral, Energy 5/10 (Initial State)";
pub const DEFAULT_HEALTH_FLAGS: &str = "No flags active (Initial State)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptainsLogState {
    #[serde(default)]
    pub current_date_time: String,
    #[serde(rename = "tan_current_location", default = "default_location")]
    pub current_location: String,
    #[serde(rename = "tan_mood_energy_summary", default = "default_mood_energy")]
    pub mood_energy_summary: String,
    #[serde(default = "default_health_flags")]
    pub health_metric_flags: String,
    #[serde(default)]
    pub active_projects: IndexMap<String, ActiveProject>,
    #[serde(default)]
    pub recent_key_insights: Vec<Insight>,
    #[serde(default)]
    pub pending_decisions: IndexMap<String, PendingDecision>,
    #[serde(default = "default_version")]
    pub nomad_version: String,
    /// Variables set through `set-state` that have no dedicated field
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProject {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub milestone: String,
    #[serde(default)]
    pub next_step: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub summary: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingDecision {
    #[serde(default)]
    pub transformative_flag: bool,
}

impl CaptainsLogState {
    /// Fresh state stamped with the given clock reading
    pub fn initial(current_date_time: String) -> Self {
        Self {
            current_date_time,
            current_location: default_location(),
            mood_energy_summary: default_mood_energy(),
            health_metric_flags: default_health_flags(),
            active_projects: IndexMap::new(),
            recent_key_insights: Vec::new(),
            pending_decisions: IndexMap::new(),
            nomad_version: default_version(),
            extra: serde_json::Map::new(),
        }
    }

    /// Prepend an insight, keeping only the most recent ones
    pub fn push_insight(&mut self, insight: Insight) {
        self.recent_key_insights.insert(0, insight);
        self.recent_key_insights.truncate(MAX_RECENT_INSIGHTS);
    }
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_mood_energy() -> String {
    DEFAULT_MOOD_ENERGY.to_string()
}

fn default_health_flags() -> String {
    DEFAULT_HEALTH_FLAGS.to_string()
}

fn default_version() -> String {
    DEFAULT_NOMAD_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initial_state_has_defaults() {
        let state = CaptainsLogState::initial("2025-05-16 09:00:00 +01:00".to_string());
        assert_eq!(state.current_location, DEFAULT_LOCATION);
        assert_eq!(state.nomad_version, "0.3");
        assert!(state.active_projects.is_empty());
        assert!(state.extra.is_empty());
    }

    #[test]
    fn serializes_with_persisted_key_names() {
        let state = CaptainsLogState::initial("now".to_string());
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["tan_current_location"], json!(DEFAULT_LOCATION));
        assert_eq!(value["tan_mood_energy_summary"], json!(DEFAULT_MOOD_ENERGY));
        assert_eq!(value["nomad_version"], json!("0.3"));
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let raw = json!({
            "current_date_time": "then",
            "tan_current_location": "Lisbon",
            "tan_timezone": "Europe/Lisbon",
            "active_projects": {
                "Blog": {"status": "Active", "milestone": "Draft", "next_step": "Outline"}
            }
        });
        let state: CaptainsLogState = serde_json::from_value(raw).unwrap();
        assert_eq!(state.current_location, "Lisbon");
        assert_eq!(state.extra["tan_timezone"], json!("Europe/Lisbon"));
        assert_eq!(state.active_projects["Blog"].next_step, "Outline");
        // Missing fields take defaults
        assert_eq!(state.health_metric_flags, DEFAULT_HEALTH_FLAGS);

        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back["tan_timezone"], json!("Europe/Lisbon"));
    }

    #[test]
    fn insights_are_capped_newest_first() {
        let mut state = CaptainsLogState::initial("now".to_string());
        for i in 0..7 {
            state.push_insight(Insight {
                summary: format!("insight {}", i),
                date: "2025-05-16".to_string(),
            });
        }
        assert_eq!(state.recent_key_insights.len(), MAX_RECENT_INSIGHTS);
        assert_eq!(state.recent_key_insights[0].summary, "insight 6");
        assert_eq!(state.recent_key_insights[4].summary, "insight 2");
    }
}
