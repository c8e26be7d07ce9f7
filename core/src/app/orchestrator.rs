//! Module orchestrator
//!
//! Routes user input through a TanOS module: loads the module's system
//! prompt, compiles the Captain's Log and MEMORIES context, calls the LLM
//! and persists state afterwards.

use std::sync::Arc;

use serde::Serialize;

use super::{CaptainsLogService, ChangelogService, HealthService, MemoryService, PromptService};
use crate::domain::entities::{HealthReport, MemoryKey, TanosModule};
use crate::domain::ports::{
    ChangelogRepository, LlmClient, LlmRequest, MemoryRepository, PromptRepository,
    StateRepository,
};
use crate::error::AppError;

/// Core memories in context order, with their headings
const CONTEXT_MEMORIES: [(&str, &str); 3] = [
    ("Core Identity & Values", "tan_core_identity_values"),
    ("Growth Plan & Goals", "tan_growth_plan_goals"),
    ("Cognitive & OS Preferences", "tan_cognitive_os_preferences"),
];

/// Outcome of a CrowsNest health check-in
#[derive(Debug, Serialize)]
pub struct HealthLogOutcome {
    pub flags: String,
    pub summary: String,
    pub response: String,
}

pub struct ModuleOrchestrator<SR, MR, CR, PR, L>
where
    SR: StateRepository,
    MR: MemoryRepository,
    CR: ChangelogRepository,
    PR: PromptRepository,
    L: LlmClient,
{
    state: Arc<CaptainsLogService<SR>>,
    health: Arc<HealthService<SR>>,
    memories: Arc<MemoryService<MR>>,
    changelog: Arc<ChangelogService<CR>>,
    prompts: Arc<PromptService<PR>>,
    llm: Arc<L>,
    user_name: String,
}

impl<SR, MR, CR, PR, L> ModuleOrchestrator<SR, MR, CR, PR, L>
where
    SR: StateRepository,
    MR: MemoryRepository,
    CR: ChangelogRepository,
    PR: PromptRepository,
    L: LlmClient,
{
    pub fn new(
        state: Arc<CaptainsLogService<SR>>,
        health: Arc<HealthService<SR>>,
        memories: Arc<MemoryService<MR>>,
        changelog: Arc<ChangelogService<CR>>,
        prompts: Arc<PromptService<PR>>,
        llm: Arc<L>,
        user_name: String,
    ) -> Self {
        Self {
            state,
            health,
            memories,
            changelog,
            prompts,
            llm,
            user_name,
        }
    }

    /// Captain's Log snapshot plus the core memories, between section markers
    pub async fn full_context(&self) -> Result<String, AppError> {
        let latest = self.changelog.latest_version().await?;
        self.state.update_nomad_version(&latest).await?;

        let captains_log = self.state.formatted_state_for_prompt().await?;

        let mut context = format!(
            "--- CURRENT CAPTAIN'S LOG OPERATIONAL STATE ---\n\
             {}\n\
             --- END CAPTAIN'S LOG ---\n\
             \n\
             --- RELEVANT MEMORIES ({}'s Core Profile) ---\n",
            captains_log, self.user_name
        );

        for (i, (title, raw_key)) in CONTEXT_MEMORIES.iter().enumerate() {
            let key = MemoryKey::parse(raw_key)?;
            let content = self.memories.content_for_prompt(&key).await?;
            let separator = if i + 1 < CONTEXT_MEMORIES.len() { "\n\n" } else { "\n" };
            context.push_str(&format!(
                "**{} Summary (from MEMORIES/{}.md - structured as {})**\n{}{}",
                title,
                key,
                self.memories.describe(&key),
                content,
                separator
            ));
        }
        context.push_str("--- END MEMORIES ---\n");

        Ok(context)
    }

    /// Send the user's input through a module and return the model's answer
    pub async fn process_user_interaction(
        &self,
        user_input: &str,
        module: TanosModule,
    ) -> Result<String, AppError> {
        if user_input.trim().is_empty() {
            return Err(AppError::BadRequest("input must not be empty".to_string()));
        }
        tracing::info!(module = %module, "processing input");

        let system_prompt = self
            .prompts
            .module_system_prompt(module)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "could not load prompt for {}: {}",
                    module,
                    self.prompts
                        .describe(module.dir_name(), module.system_prompt_file())
                ))
            })?;

        let context = self.full_context().await?;
        let request = LlmRequest::new(system_prompt, user_input).with_context(context);
        let response = self.llm.send_prompt(&request).await?;

        tracing::debug!(
            module = %module,
            preview = %preview(&response, 150),
            "LLM response received"
        );
        if let Some(note) = module.post_interaction_note() {
            tracing::info!(module = %module, "{}", note);
        }

        let mut state = self.state.state().await?;
        self.state.save(&mut state).await?;

        Ok(response)
    }

    /// Start a guided Workshop conceptual tool
    pub async fn simulate_conceptual_tool(
        &self,
        tool_file: &str,
        initial_input: &str,
    ) -> Result<String, AppError> {
        tracing::info!(tool = tool_file, "starting conceptual tool");

        let tool_prompt = self
            .prompts
            .workshop_tool_prompt(tool_file)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("could not load conceptual tool prompt: {}", tool_file))
            })?;

        let context = self.full_context().await?;
        let user_prompt = format!(
            "(Now guiding {user} through the '{tool}' process. Initial context/question from {user}: '{input}')\n\
             Let's begin with the first step of this conceptual tool.",
            user = self.user_name,
            tool = tool_file,
            input = initial_input,
        );
        let response = self
            .llm
            .send_prompt(&LlmRequest::new(tool_prompt, user_prompt).with_context(context))
            .await?;

        tracing::info!(
            tool = tool_file,
            "conceptual tool initiated; a closing summary is expected at the end"
        );
        Ok(response)
    }

    /// Record a health check-in, update the Captain's Log and consult CrowsNest
    pub async fn log_health_metrics(&self, report: HealthReport) -> Result<HealthLogOutcome, AppError> {
        if report.is_empty() {
            return Err(AppError::BadRequest("no health data provided to log".to_string()));
        }

        let summary = report.summary_line();
        let mood_energy = report.mood_energy_summary();
        let flags = self.health.record(report).await?;

        let flags_for_state = flags.clone();
        self.state
            .update(move |s| {
                s.health_metric_flags = flags_for_state;
                if let Some(mood) = mood_energy {
                    s.mood_energy_summary = mood;
                }
            })
            .await?;

        let response = self
            .process_user_interaction(&summary, TanosModule::CrowsNest)
            .await?;

        Ok(HealthLogOutcome {
            flags,
            summary,
            response,
        })
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
