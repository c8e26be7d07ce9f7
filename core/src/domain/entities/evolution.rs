//! ArchitectOS evolution reports
//!
//! Output of one Generator-Critic-Mutator cycle over a module prompt.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::module::TanosModule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvolutionReportId(pub Uuid);

impl EvolutionReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EvolutionReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EvolutionReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EvolutionReportId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(EvolutionReportId)
            .map_err(|e| format!("Invalid report id '{}': {}", s, e))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub id: EvolutionReportId,
    pub created_at: DateTime<Utc>,
    pub objective: String,
    pub module: TanosModule,
    pub prompt_file: String,
    pub generator_proposals: String,
    pub critic_notes: String,
    pub evolved_suggestions: String,
    pub suggested_next_cycle: String,
    /// Generator labels found in the proposals (G1, G2, ...)
    #[serde(default)]
    pub proposal_labels: Vec<String>,
    /// Mutator labels found in the evolved variants (M1, M2, ...)
    #[serde(default)]
    pub variant_labels: Vec<String>,
}

impl EvolutionReport {
    pub fn summary(&self) -> EvolutionReportSummary {
        EvolutionReportSummary {
            id: self.id,
            created_at: self.created_at,
            module: self.module,
            prompt_file: self.prompt_file.clone(),
            objective: self.objective.clone(),
        }
    }
}

/// Listing row for stored reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionReportSummary {
    pub id: EvolutionReportId,
    pub created_at: DateTime<Utc>,
    pub module: TanosModule,
    pub prompt_file: String,
    pub objective: String,
}

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([GCM])(\d{1,2})\b").unwrap())
}

/// Extract distinct labels with the given prefix (`G` or `M`) in order of first appearance
pub fn extract_labels(text: &str, prefix: char) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for cap in label_regex().captures_iter(text) {
        if cap[1].starts_with(prefix) {
            let label = format!("{}{}", &cap[1], &cap[2]);
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }
    labels
}
