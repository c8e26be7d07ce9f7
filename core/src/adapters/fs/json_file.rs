//! JSON file helpers shared by the filesystem repositories

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DomainError;

/// Read and parse a JSON file, `None` if the file doesn't exist
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DomainError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(DomainError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DomainError::Parse(format!("{}: {}", path.display(), e)))
}

/// Serialize to 4-space indented JSON
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write a value as pretty JSON, creating parent directories.
///
/// Writes to a sibling temp file first so a crash never leaves a half-written document.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DomainError> {
    let bytes = to_pretty_json(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
        DomainError::Storage(format!("failed to write {}: {}", tmp.display(), e))
    })?;
    tokio::fs::rename(&tmp, path).await.map_err(|e| {
        DomainError::Storage(format!("failed to replace {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote JSON document");
    Ok(())
}
