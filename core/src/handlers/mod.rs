//! CLI handlers
//!
//! One handler per subcommand. Each returns the text to print, or pretty
//! JSON when `--json` is set.

pub mod architect;
pub mod changelog;
pub mod health;
pub mod interact;
pub mod memory;
pub mod setup;
pub mod state;

pub use architect::{evolve_prompt, list_reports, view_report};
pub use changelog::{add_changelog_entry, draft_changelog_entry, view_changelog};
pub use health::log_health;
pub use interact::{interact, use_tool};
pub use memory::{list_suggestions, suggest_memory, view_memory};
pub use setup::{init, show_config};
pub use state::{
    add_decision, add_insight, add_project, set_location, set_mood, set_state, view_state,
};

use serde::Serialize;

use crate::cli::Commands;
use crate::error::AppError;
use crate::AppState;

/// Dispatch a parsed subcommand
pub async fn run(state: &AppState, command: Commands, json: bool) -> Result<String, AppError> {
    match command {
        Commands::Interact { module, input } => interact(state, module, &input, json).await,
        Commands::LogHealth(args) => log_health(state, args.into(), json).await,
        Commands::ViewState => view_state(state, json).await,
        Commands::SetState { key, value } => set_state(state, &key, &value, json).await,
        Commands::SetLocation { location } => set_location(state, &location, json).await,
        Commands::SetMood { summary } => set_mood(state, &summary, json).await,
        Commands::AddProject {
            name,
            status,
            milestone,
            next_step,
        } => add_project(state, &name, &status, &milestone, &next_step, json).await,
        Commands::AddInsight { summary } => add_insight(state, &summary, json).await,
        Commands::AddDecision {
            name,
            transformative,
        } => add_decision(state, &name, transformative, json).await,
        Commands::ViewMemory { key, section } => view_memory(state, &key, section, json).await,
        Commands::SuggestMemory {
            key,
            change,
            section,
        } => suggest_memory(state, &key, &change, section.unwrap_or_default(), json).await,
        Commands::ListSuggestions => list_suggestions(state, json).await,
        Commands::ViewChangelog { limit } => view_changelog(state, limit, json).await,
        Commands::DraftChangelogEntry {
            summary,
            impacted,
            files,
            current_version,
        } => {
            draft_changelog_entry(state, &summary, &impacted, &files, current_version, json).await
        }
        Commands::AddChangelogEntry {
            version,
            summary,
            impacted,
            files_updated,
        } => add_changelog_entry(state, &version, &summary, &impacted, &files_updated, json).await,
        Commands::EvolvePrompt {
            module,
            file,
            objective,
        } => evolve_prompt(state, module, &file, &objective, json).await,
        Commands::ListReports => list_reports(state, json).await,
        Commands::ViewReport { id } => view_report(state, &id, json).await,
        Commands::UseTool { file, input } => use_tool(state, &file, &input, json).await,
        Commands::Init => init(state, json).await,
        Commands::ShowConfig => show_config(state, json),
    }
}

/// Pretty JSON for `--json` output
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}

/// AppState over a temporary data directory with the mock LLM
#[cfg(test)]
pub(crate) fn test_state(dir: &std::path::Path) -> AppState {
    let data_dir = dir.join("tanos_data").display().to_string();
    let prompts_dir = dir.join("tanos_prompts").display().to_string();
    let config = crate::config::Config::from_lookup(|key| match key {
        "TANOS_DATA_DIR" => Some(data_dir.clone()),
        "TANOS_PROMPTS_DIR" => Some(prompts_dir.clone()),
        "MOCK_LLM_DELAY_MS" => Some("0".to_string()),
        _ => None,
    });
    AppState::from_config(config).unwrap()
}

/// Write a prompt file under the test prompts directory
#[cfg(test)]
pub(crate) fn write_test_prompt(dir: &std::path::Path, module_dir: &str, file: &str, content: &str) {
    let path = dir.join("tanos_prompts").join(module_dir).join(file);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
