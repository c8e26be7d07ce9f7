//! Captain's Log handlers
//!
//! View the operational state and apply manual updates to it.

use serde_json::Value;

use super::to_json;
use crate::app::captains_log_service::format_state;
use crate::domain::entities::CaptainsLogState;
use crate::error::AppError;
use crate::render::render_state;
use crate::AppState;

pub async fn view_state(state: &AppState, json: bool) -> Result<String, AppError> {
    let current = state.captains_log.state().await?;
    if json {
        return to_json(&current);
    }
    Ok(render_state(&format_state(
        &current,
        &state.config.user_name,
    )))
}

/// `VALUE` is parsed as JSON; anything that isn't valid JSON is stored as a string
pub async fn set_state(state: &AppState, key: &str, raw_value: &str, json: bool) -> Result<String, AppError> {
    let value = serde_json::from_str::<Value>(raw_value)
        .unwrap_or_else(|_| Value::String(raw_value.to_string()));

    let updated = state
        .captains_log
        .update_state_variable(key, value)
        .await?;

    if !updated {
        return Ok(format!(
            "'{}' is updated automatically; the value was ignored.",
            key.trim()
        ));
    }
    updated_output(state, &format!("Captain's Log '{}' updated.", key.trim()), json).await
}

pub async fn set_location(state: &AppState, location: &str, json: bool) -> Result<String, AppError> {
    let updated = state.captains_log.set_location(location).await?;
    finish(
        &updated,
        format!("Current location set to {}.", updated.current_location),
        json,
    )
}

pub async fn set_mood(state: &AppState, summary: &str, json: bool) -> Result<String, AppError> {
    let updated = state.captains_log.set_mood_energy(summary).await?;
    finish(
        &updated,
        format!("Mood/energy summary set to '{}'.", updated.mood_energy_summary),
        json,
    )
}

pub async fn add_project(
    state: &AppState,
    name: &str,
    status: &str,
    milestone: &str,
    next_step: &str,
    json: bool,
) -> Result<String, AppError> {
    let updated = state
        .captains_log
        .add_active_project(name, status, milestone, next_step)
        .await?;
    finish(
        &updated,
        format!("Project '{}' recorded ({}).", name.trim(), status),
        json,
    )
}

pub async fn add_insight(state: &AppState, summary: &str, json: bool) -> Result<String, AppError> {
    let updated = state.captains_log.add_insight(summary).await?;
    finish(&updated, "Insight recorded in the Captain's Log.".to_string(), json)
}

pub async fn add_decision(
    state: &AppState,
    name: &str,
    transformative: bool,
    json: bool,
) -> Result<String, AppError> {
    let updated = state
        .captains_log
        .add_pending_decision(name, transformative)
        .await?;
    let kind = if transformative {
        "Transformative decision"
    } else {
        "Decision"
    };
    finish(&updated, format!("{} '{}' added to pending decisions.", kind, name.trim()), json)
}

async fn updated_output(state: &AppState, message: &str, json: bool) -> Result<String, AppError> {
    let current = state.captains_log.state().await?;
    finish(&current, message.to_string(), json)
}

fn finish(updated: &CaptainsLogState, message: String, json: bool) -> Result<String, AppError> {
    if json {
        to_json(updated)
    } else {
        Ok(message)
    }
}
