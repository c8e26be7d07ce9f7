//! Setup handlers
//!
//! First-run scaffolding and configuration display.

use serde_json::json;

use super::to_json;
use crate::domain::ports::LlmClient;
use crate::error::AppError;
use crate::render::{render_config, ConfigView};
use crate::AppState;

/// Create data directories, placeholder core memories, module prompt
/// skeletons and the initial Captain's Log state
pub async fn init(state: &AppState, json: bool) -> Result<String, AppError> {
    state
        .config
        .ensure_data_dirs()
        .await
        .map_err(|e| AppError::Internal(format!("could not create data directories: {}", e)))?;

    let memories = state.memories.ensure_core_memories().await?;
    let prompts = state.prompts.scaffold_module_prompts().await?;

    let mut current = state.captains_log.state().await?;
    state.captains_log.save(&mut current).await?;

    let memory_paths: Vec<String> = memories.iter().map(|k| state.memories.describe(k)).collect();
    tracing::info!(
        memories = memory_paths.len(),
        prompts = prompts.len(),
        "TanOS initialized"
    );

    if json {
        return to_json(&json!({
            "created_memories": memory_paths,
            "created_prompts": prompts,
            "state_file": state.config.state_file().display().to_string(),
        }));
    }

    let mut buf = String::from("TanOS initialized.");
    if memory_paths.is_empty() && prompts.is_empty() {
        buf.push_str("\nNothing to create; existing memories and prompts were kept.");
    }
    for path in memory_paths.iter().chain(prompts.iter()) {
        buf.push_str(&format!("\n  created {}", path));
    }
    buf.push_str(&format!(
        "\nCaptain's Log state: {}",
        state.config.state_file().display()
    ));
    Ok(buf)
}

pub fn show_config(state: &AppState, json: bool) -> Result<String, AppError> {
    let config = &state.config;
    let view = ConfigView {
        prompts_dir: config.prompts_dir.display().to_string(),
        data_dir: config.data_dir.display().to_string(),
        user_name: config.user_name.clone(),
        utc_offset: config.utc_offset.to_string(),
        llm_provider: state.llm.provider().to_string(),
        llm_model: state.llm.model(&config.llm).map(String::from),
    };

    if json {
        return to_json(&view);
    }
    Ok(render_config(&view))
}
