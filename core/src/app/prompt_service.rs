//! Prompt service
//!
//! Loads module system prompts and Workshop conceptual tools, caching by
//! `module_dir/file`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entities::TanosModule;
use crate::domain::ports::PromptRepository;
use crate::error::AppError;

/// Subdirectory of Workshop holding conceptual tool prompts
pub const WORKSHOP_TOOLS_DIR: &str = "Tools";

pub struct PromptService<PR>
where
    PR: PromptRepository,
{
    repo: Arc<PR>,
    cache: RwLock<HashMap<String, String>>,
    user_name: String,
}

impl<PR> PromptService<PR>
where
    PR: PromptRepository,
{
    pub fn new(repo: Arc<PR>, user_name: String) -> Self {
        Self {
            repo,
            cache: RwLock::new(HashMap::new()),
            user_name,
        }
    }

    /// Load `<module_dir>/<file>`; `None` (with a warning) if it doesn't exist
    pub async fn load_prompt(
        &self,
        module_dir: &str,
        file: &str,
        force_reload: bool,
    ) -> Result<Option<String>, AppError> {
        let cache_key = format!("{}/{}", module_dir, file);
        if !force_reload {
            if let Some(content) = self.cache.read().await.get(&cache_key) {
                return Ok(Some(content.clone()));
            }
        }

        match self.repo.read(module_dir, file).await? {
            Some(content) => {
                tracing::debug!(prompt = %cache_key, "loaded prompt");
                self.cache.write().await.insert(cache_key, content.clone());
                Ok(Some(content))
            }
            None => {
                tracing::warn!(path = %self.repo.describe(module_dir, file), "prompt file not found");
                Ok(None)
            }
        }
    }

    pub async fn module_system_prompt(&self, module: TanosModule) -> Result<Option<String>, AppError> {
        self.load_prompt(module.dir_name(), module.system_prompt_file(), false)
            .await
    }

    /// Conceptual tool prompt from `Workshop/Tools/<file>`
    pub async fn workshop_tool_prompt(&self, file: &str) -> Result<Option<String>, AppError> {
        self.load_prompt(
            TanosModule::Workshop.dir_name(),
            &format!("{}/{}", WORKSHOP_TOOLS_DIR, file),
            false,
        )
        .await
    }

    /// Write a placeholder system prompt for every module that lacks one
    ///
    /// Returns the paths that were created.
    pub async fn scaffold_module_prompts(&self) -> Result<Vec<String>, AppError> {
        let mut created = Vec::new();
        for module in TanosModule::ALL {
            let content = placeholder_prompt(module, &self.user_name);
            let written = self
                .repo
                .write_if_missing(module.dir_name(), module.system_prompt_file(), &content)
                .await?;
            if written {
                created.push(self.describe(module.dir_name(), module.system_prompt_file()));
            }
        }
        Ok(created)
    }

    pub fn describe(&self, module_dir: &str, file: &str) -> String {
        self.repo.describe(module_dir, file)
    }
}

fn placeholder_prompt(module: TanosModule, user_name: &str) -> String {
    format!(
        "You are Nomad, {user}'s personal copilot, operating the {module} module ({role}).\n\
         \n\
         Replace this placeholder with the full {module} system prompt.\n\
         Use the Captain's Log state and {user}'s MEMORIES provided as context.\n",
        user = user_name,
        module = module,
        role = module.role(),
    )
}
