//! Console renderer
//!
//! Renders command results to the text blocks printed by the CLI.

use serde::Serialize;

use crate::app::HealthLogOutcome;
use crate::domain::entities::{
    ChangelogEntry, EvolutionReport, EvolutionReportSummary, HealthReport, MemoryKey,
    MemorySuggestion, SectionPath, TanosModule,
};

/// Resolved configuration as shown by `show-config`
#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub prompts_dir: String,
    pub data_dir: String,
    pub user_name: String,
    pub utc_offset: String,
    pub llm_provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
}

pub fn render_interaction(module: TanosModule, response: &str) -> String {
    format!(
        "Engaging Nomad ({})...\n\n--- Nomad's Response ---\n{}\n----------------------",
        module, response
    )
}

pub fn render_tool_session(tool_file: &str, response: &str) -> String {
    format!(
        "Starting Workshop tool: {}...\n\n--- Nomad (Workshop Tool) Response ---\n{}\n-------------------------------------",
        tool_file, response
    )
}

/// Echo of the metrics about to be logged
pub fn render_health_input(report: &HealthReport) -> String {
    let mut buf = String::from("Health Data to Log for CrowsNest:");
    for (label, value) in report.labelled_values() {
        buf.push_str(&format!("\n- {}: {}", label, value));
    }
    buf
}

pub fn render_health_outcome(outcome: &HealthLogOutcome) -> String {
    let mut buf = String::new();
    buf.push_str(&format!("\nLogging health metrics: '{}'\n", outcome.summary));
    buf.push_str("\n--- Nomad (CrowsNest) Response ---\n");
    buf.push_str(&outcome.response);
    buf.push_str("\n--------------------------------\n");
    buf.push_str("Captain's Log updated with these health metrics.\n");
    buf.push_str(&format!("Health Metric Flags: {}", outcome.flags));
    buf
}

pub fn render_state(snapshot: &str) -> String {
    format!(
        "--- Current Captain's Log State ---\n{}\n---------------------------------",
        snapshot
    )
}

pub fn render_memory(key: &MemoryKey, section: Option<&SectionPath>, content: Option<&str>) -> String {
    let heading = match section.filter(|s| !s.is_empty()) {
        Some(path) => format!("--- Content of MEMORY: {} ({}) ---", key, path.display_arrow()),
        None => format!("--- Content of MEMORY: {} ---", key),
    };
    format!(
        "{}\n{}\n------------------------------------",
        heading,
        content.unwrap_or("Memory not found or empty.")
    )
}

/// Changelog listing, newest first
pub fn render_changelog(entries: &[ChangelogEntry], limit: usize, user_name: &str) -> String {
    let mut buf = format!("--- Nomad Changelog (Last {} Entries) ---\n", limit);

    if entries.is_empty() {
        buf.push_str("Changelog is empty.\n");
    }

    for entry in entries {
        buf.push_str(&format!("Version: {} (Date: {})\n", entry.version, entry.date));
        buf.push_str(&format!("  Summary: {}\n", entry.summary));
        buf.push_str(&format!("  Impacted: {}\n", entry.impacted_modules.join(", ")));
        buf.push_str(&format!(
            "  Files Updated by {}: {}\n",
            user_name,
            entry.files_updated_by_tan.join(", ")
        ));
        buf.push_str(&"-".repeat(20));
        buf.push('\n');
    }

    buf.push_str("---------------------------------------");
    buf
}

/// Full G-C-M cycle output with the follow-up instructions
pub fn render_evolution_report(report: &EvolutionReport, prompt_path: &str) -> String {
    let mut buf = String::new();

    buf.push_str(&format!(
        "Engaging ArchitectOS to evolve: {}/{}\n",
        report.module, report.prompt_file
    ));
    buf.push_str(&format!("Objective: {}\n", report.objective));

    buf.push_str("\n--- ArchitectOS G-C-M Cycle Output ---\n");
    buf.push_str("Suggested Evolved Prompt Text/Concepts:\n");
    buf.push_str(&report.evolved_suggestions);
    buf.push_str("\n\nGenerator Proposals Text:\n");
    buf.push_str(&report.generator_proposals);
    buf.push_str("\n\nCritic Notes Text:\n");
    buf.push_str(&report.critic_notes);
    buf.push_str(&format!(
        "\n\nSuggested Next Architect Cycle: {}\n",
        report.suggested_next_cycle
    ));
    buf.push_str("------------------------------------\n");

    if !report.proposal_labels.is_empty() || !report.variant_labels.is_empty() {
        buf.push_str(&format!(
            "Proposals: {} | Variants: {}\n",
            labels_or_none(&report.proposal_labels),
            labels_or_none(&report.variant_labels)
        ));
    }
    buf.push_str(&format!("Report saved as {}\n", report.id));

    buf.push_str("ACTION: Review the 'evolved_prompt_suggestions_text'. If a suggestion is valuable,\n");
    buf.push_str(&format!("manually update the '{}' file.\n", prompt_path));
    buf.push_str("Then, draft and add an entry to Nomad's Changelog using 'tanos add-changelog-entry'.");
    buf
}

pub fn render_report_list(reports: &[EvolutionReportSummary]) -> String {
    if reports.is_empty() {
        return "No ArchitectOS reports stored.".to_string();
    }

    let mut buf = String::from("--- ArchitectOS Reports ---");
    for report in reports {
        buf.push_str(&format!(
            "\n{} {} {}/{}: {}",
            report.created_at.format("%Y-%m-%d %H:%M"),
            report.id,
            report.module,
            report.prompt_file,
            truncate(&report.objective, 60)
        ));
    }
    buf
}

pub fn render_suggestions(suggestions: &[MemorySuggestion]) -> String {
    if suggestions.is_empty() {
        return "No pending memory suggestions.".to_string();
    }

    let mut buf = format!("--- Pending Memory Suggestions ({}) ---", suggestions.len());
    for (i, suggestion) in suggestions.iter().enumerate() {
        let section = if suggestion.section_path.is_empty() {
            String::new()
        } else {
            format!(" [{}]", suggestion.section_path.display_arrow())
        };
        buf.push_str(&format!(
            "\n{}. {}{} ({}): {}",
            i + 1,
            suggestion.memory_key,
            section,
            suggestion.created_at.format("%Y-%m-%d"),
            suggestion.description
        ));
    }
    buf
}

pub fn render_config(view: &ConfigView) -> String {
    let mut buf = String::new();
    buf.push_str(&format!("Prompts directory: {}\n", view.prompts_dir));
    buf.push_str(&format!("Data directory:    {}\n", view.data_dir));
    buf.push_str(&format!("User:              {}\n", view.user_name));
    buf.push_str(&format!("UTC offset:        {}\n", view.utc_offset));
    buf.push_str(&format!("LLM provider:      {}", view.llm_provider));
    if let Some(model) = &view.llm_model {
        buf.push_str(&format!(" ({})", model));
    }
    buf
}

fn labels_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "none".to_string()
    } else {
        labels.join(", ")
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
