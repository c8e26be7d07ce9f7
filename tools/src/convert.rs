//! Markdown MEMORIES to JSON conversion
//!
//! Each `<stem>.md` becomes `<stem>.json` holding `{"content": "<markdown>"}`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::json;

/// Convert one Markdown file, creating the output directory if needed
pub fn convert_file(md_path: &Path, json_path: &Path) -> Result<()> {
    let content = fs::read_to_string(md_path)
        .with_context(|| format!("failed to read {}", md_path.display()))?;

    if let Some(parent) = json_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut doc = serde_json::to_string_pretty(&json!({ "content": content }))?;
    doc.push('\n');
    fs::write(json_path, doc).with_context(|| format!("failed to write {}", json_path.display()))?;

    tracing::info!(from = %md_path.display(), to = %json_path.display(), "converted memory");
    Ok(())
}

/// Convert every `*.md` file directly inside `md_dir`, in name order
///
/// Returns the JSON files written.
pub fn convert_dir(md_dir: &Path, json_dir: &Path) -> Result<Vec<PathBuf>> {
    if !md_dir.is_dir() {
        bail!("markdown directory not found: {}", md_dir.display());
    }

    let mut sources: Vec<PathBuf> = fs::read_dir(md_dir)
        .with_context(|| format!("failed to list {}", md_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    sources.sort();

    let mut written = Vec::with_capacity(sources.len());
    for md_path in sources {
        let Some(stem) = md_path.file_stem() else {
            continue;
        };
        let json_path = json_dir.join(format!("{}.json", stem.to_string_lossy()));
        convert_file(&md_path, &json_path)?;
        written.push(json_path);
    }

    if written.is_empty() {
        tracing::warn!(dir = %md_dir.display(), "no markdown memories found");
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_markdown_files_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let md_dir = tmp.path().join("md");
        let json_dir = tmp.path().join("out/memories");
        fs::create_dir_all(&md_dir).unwrap();
        fs::write(md_dir.join("tan_growth_plan_goals.md"), "# Goals\n- Run 10k").unwrap();
        fs::write(md_dir.join("tan_core_identity_values.md"), "# Valores\n- Libertad ñ").unwrap();
        fs::write(md_dir.join("notes.txt"), "ignored").unwrap();

        let written = convert_dir(&md_dir, &json_dir).unwrap();

        assert_eq!(
            written,
            vec![
                json_dir.join("tan_core_identity_values.json"),
                json_dir.join("tan_growth_plan_goals.json"),
            ]
        );
        let raw = fs::read_to_string(json_dir.join("tan_core_identity_values.json")).unwrap();
        assert_eq!(raw, "{\n  \"content\": \"# Valores\\n- Libertad ñ\"\n}\n");
        assert!(!json_dir.join("notes.json").exists());
    }

    #[test]
    fn missing_input_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = convert_dir(&tmp.path().join("nope"), &tmp.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("markdown directory not found"));
    }

    #[test]
    fn empty_dir_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(convert_dir(tmp.path(), &tmp.path().join("out")).unwrap().is_empty());
    }
}
