//! Prompt files under the prompts root
//!
//! Paths are `<root>/<module_dir>/<file>`, where `file` may contain
//! subdirectories (e.g. `Tools/apply_systems_thinking_lens_prompt.txt`).
//! Anything that would escape the root is rejected.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ports::PromptRepository;
use crate::error::DomainError;

pub struct FsPromptRepository {
    prompts_dir: PathBuf,
}

impl FsPromptRepository {
    pub fn new(prompts_dir: PathBuf) -> Self {
        Self { prompts_dir }
    }

    fn resolve(&self, module_dir: &str, file: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(module_dir).join(file);
        let safe = !file.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(DomainError::Validation(format!(
                "prompt path must stay inside the prompts directory: {}/{}",
                module_dir, file
            )));
        }
        Ok(self.prompts_dir.join(relative))
    }
}

#[async_trait]
impl PromptRepository for FsPromptRepository {
    async fn read(&self, module_dir: &str, file: &str) -> Result<Option<String>, DomainError> {
        let path = self.resolve(module_dir, file)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Storage(format!(
                "failed to read prompt {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_if_missing(
        &self,
        module_dir: &str,
        file: &str,
        content: &str,
    ) -> Result<bool, DomainError> {
        let path = self.resolve(module_dir, file)?;
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        tracing::info!(path = %path.display(), "created prompt file");
        Ok(true)
    }

    fn describe(&self, module_dir: &str, file: &str) -> String {
        self.prompts_dir
            .join(module_dir)
            .join(file)
            .display()
            .to_string()
    }
}
