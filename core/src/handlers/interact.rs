//! Interaction handlers
//!
//! Send user input through a module, or start a Workshop conceptual tool.

use serde_json::json;

use super::to_json;
use crate::domain::entities::TanosModule;
use crate::error::AppError;
use crate::render::{render_interaction, render_tool_session};
use crate::AppState;

pub async fn interact(
    state: &AppState,
    module: TanosModule,
    input: &str,
    json: bool,
) -> Result<String, AppError> {
    let response = state
        .orchestrator
        .process_user_interaction(input, module)
        .await?;

    if json {
        return to_json(&json!({ "module": module, "response": response }));
    }
    Ok(render_interaction(module, &response))
}

pub async fn use_tool(
    state: &AppState,
    tool_file: &str,
    input: &str,
    json: bool,
) -> Result<String, AppError> {
    let response = state
        .orchestrator
        .simulate_conceptual_tool(tool_file, input)
        .await?;

    if json {
        return to_json(&json!({ "tool": tool_file, "response": response }));
    }
    Ok(render_tool_session(tool_file, &response))
}
