//! MEMORIES handlers
//!
//! Memories are read-only to Nomad. Changes are recorded as suggestions for
//! the user to apply by hand.

use serde_json::{json, Value};

use super::to_json;
use crate::domain::entities::{MemoryKey, SectionPath};
use crate::error::AppError;
use crate::render::{render_memory, render_suggestions};
use crate::AppState;

pub async fn view_memory(
    state: &AppState,
    key: &MemoryKey,
    section: Option<SectionPath>,
    json: bool,
) -> Result<String, AppError> {
    let content = match &section {
        Some(path) => state.memories.get_memory_section(key, path).await?,
        None => state.memories.load_memory(key, false).await?,
    };

    if json {
        return to_json(&json!({
            "key": key,
            "section": section.as_ref().map(|p| p.to_string()),
            "content": content,
        }));
    }

    let text = content.as_ref().map(pretty).transpose()?;
    Ok(render_memory(key, section.as_ref(), text.as_deref()))
}

pub async fn suggest_memory(
    state: &AppState,
    key: &MemoryKey,
    change: &str,
    section: SectionPath,
    json: bool,
) -> Result<String, AppError> {
    let suggestion = state
        .memories
        .suggest_memory_update(key, change, section)
        .await?;

    if json {
        return to_json(&suggestion);
    }
    Ok(format!(
        "Suggestion recorded for {}. Review it and update '{}' manually.",
        suggestion.memory_key,
        state.memories.describe(&suggestion.memory_key)
    ))
}

pub async fn list_suggestions(state: &AppState, json: bool) -> Result<String, AppError> {
    let suggestions = state.memories.list_suggestions().await?;
    if json {
        return to_json(&suggestions);
    }
    Ok(render_suggestions(&suggestions))
}

fn pretty(value: &Value) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}
