//! Nomad changelog handlers

use serde_json::json;

use super::to_json;
use crate::cli::split_list;
use crate::domain::entities::NewChangelogEntry;
use crate::error::AppError;
use crate::render::render_changelog;
use crate::AppState;

pub async fn view_changelog(state: &AppState, limit: usize, json: bool) -> Result<String, AppError> {
    let entries = state.changelog.entries(limit).await?;
    if json {
        return to_json(&entries);
    }
    Ok(render_changelog(&entries, limit, &state.config.user_name))
}

pub async fn draft_changelog_entry(
    state: &AppState,
    summary: &str,
    impacted: &str,
    files: &str,
    current_version: Option<String>,
    json: bool,
) -> Result<String, AppError> {
    if summary.trim().is_empty() {
        return Err(AppError::BadRequest("summary must not be empty".to_string()));
    }

    let current = match current_version {
        Some(v) => v.trim().to_string(),
        None => state.changelog.latest_version().await?,
    };
    let draft = state.changelog.draft_entry_text(
        &current,
        summary.trim(),
        &split_list(impacted),
        &split_list(files),
    );

    if json {
        return to_json(&json!({ "current_version": current, "draft": draft }));
    }
    Ok(draft)
}

/// Record the entry and move the Captain's Log to the new version
pub async fn add_changelog_entry(
    state: &AppState,
    version: &str,
    summary: &str,
    impacted: &str,
    files_updated: &str,
    json: bool,
) -> Result<String, AppError> {
    let entry = state
        .changelog
        .add_entry(NewChangelogEntry {
            version: version.to_string(),
            date: state.changelog.today(),
            summary: summary.to_string(),
            impacted_modules: split_list(impacted),
            files_updated: split_list(files_updated),
        })
        .await?;

    state
        .captains_log
        .update_nomad_version(&entry.version)
        .await?;

    if json {
        return to_json(&entry);
    }
    Ok(format!(
        "Entry for version {v} added to Nomad changelog.\nCaptain's Log nomad_version updated to {v}.",
        v = entry.version
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;

    #[tokio::test]
    async fn empty_changelog_view() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let out = view_changelog(&state, 5, false).await.unwrap();

        assert!(out.contains("Changelog is empty."));
    }

    #[tokio::test]
    async fn add_entry_updates_state_version() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let out = add_changelog_entry(
            &state,
            "0.3.1",
            "Outline-first planning",
            "ChartRoom, Workshop",
            "ChartRoom/Planning_Module_Prompt.txt",
            false,
        )
        .await
        .unwrap();

        assert_eq!(
            out,
            "Entry for version 0.3.1 added to Nomad changelog.\nCaptain's Log nomad_version updated to 0.3.1."
        );
        assert_eq!(state.captains_log.state().await.unwrap().nomad_version, "0.3.1");

        let listing = view_changelog(&state, 5, false).await.unwrap();
        assert!(listing.contains("Version: 0.3.1 (Date: "));
        assert!(listing.contains("  Impacted: ChartRoom, Workshop\n"));
    }

    #[tokio::test]
    async fn draft_increments_latest_version() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        add_changelog_entry(&state, "0.3.4", "First", "", "", false)
            .await
            .unwrap();

        let draft = draft_changelog_entry(&state, "Sharper critic", "Workshop", "", None, false)
            .await
            .unwrap();

        assert!(draft.starts_with("**Version 0.3.5 ("));
        assert!(draft.ends_with(
            "Learned/Refined: Sharper critic. Impacted Modules: Workshop. Action: Tan updated relevant prompts/memories."
        ));
    }

    #[tokio::test]
    async fn draft_with_unparseable_version_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let out = draft_changelog_entry(&state, "Tweak", "", "", Some("beta".to_string()), true)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["current_version"], "beta");
        assert!(value["draft"].as_str().unwrap().starts_with("**Version beta-next ("));
    }
}
