//! ArchitectOS
//!
//! Evolves a TanOS prompt with one Generator-Critic-Mutator (G-C-M) cycle:
//! three LLM calls sharing one architect system prompt, each stage fed the
//! output of the previous ones. The result is stored as an evolution report
//! for the user to review; prompts are never rewritten automatically.

use std::sync::Arc;

use chrono::Utc;

use super::{MemoryService, PromptService};
use crate::domain::entities::{
    extract_labels, EvolutionReport, EvolutionReportId, EvolutionReportSummary, MemoryKey,
    TanosModule,
};
use crate::domain::ports::{
    EvolutionReportRepository, LlmClient, LlmRequest, MemoryRepository, PromptRepository,
};
use crate::error::AppError;

pub struct ArchitectService<MR, PR, RR, L>
where
    MR: MemoryRepository,
    PR: PromptRepository,
    RR: EvolutionReportRepository,
    L: LlmClient,
{
    memories: Arc<MemoryService<MR>>,
    prompts: Arc<PromptService<PR>>,
    reports: Arc<RR>,
    llm: Arc<L>,
    user_name: String,
}

impl<MR, PR, RR, L> ArchitectService<MR, PR, RR, L>
where
    MR: MemoryRepository,
    PR: PromptRepository,
    RR: EvolutionReportRepository,
    L: LlmClient,
{
    pub fn new(
        memories: Arc<MemoryService<MR>>,
        prompts: Arc<PromptService<PR>>,
        reports: Arc<RR>,
        llm: Arc<L>,
        user_name: String,
    ) -> Self {
        Self {
            memories,
            prompts,
            reports,
            llm,
            user_name,
        }
    }

    async fn relevant_memories(&self) -> Result<String, AppError> {
        let preferences = self
            .memories
            .content_for_prompt(&MemoryKey::parse("tan_cognitive_os_preferences")?)
            .await?;
        let identity = self
            .memories
            .content_for_prompt(&MemoryKey::parse("tan_core_identity_values")?)
            .await?;
        Ok(format!(
            "Cognitive/OS Preferences:\n{}\n\nCore Identity/Values:\n{}",
            preferences, identity
        ))
    }

    /// Run one G-C-M cycle against `<module>/<prompt_file>` and store the report
    pub async fn run_gcm_cycle(
        &self,
        objective: &str,
        module: TanosModule,
        prompt_file: &str,
    ) -> Result<EvolutionReport, AppError> {
        let objective = objective.trim();
        if objective.is_empty() {
            return Err(AppError::BadRequest("objective must not be empty".to_string()));
        }
        tracing::info!(module = %module, prompt = prompt_file, objective, "starting G-C-M cycle");

        let target = self
            .prompts
            .load_prompt(module.dir_name(), prompt_file, false)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "could not load target prompt {}",
                    self.prompts.describe(module.dir_name(), prompt_file)
                ))
            })?;

        let system_prompt = architect_system_prompt(
            objective,
            &target,
            &self.relevant_memories().await?,
            &self.user_name,
        );

        tracing::info!("engaging Generator (G_TanOS mode)");
        let proposals = self
            .ask(&system_prompt, generator_prompt(&self.user_name))
            .await?;

        tracing::info!("engaging Critic (C_TanOS mode)");
        let critiques = self
            .ask(&system_prompt, critic_prompt(&proposals, &self.user_name))
            .await?;

        tracing::info!("engaging Mutator (M_TanOS mode)");
        let selected = format!(
            "Proposals from Generator:\n{}\n\nCritiques from Critic:\n{}",
            proposals, critiques
        );
        let variants = self
            .ask(&system_prompt, mutator_prompt(&selected, &self.user_name))
            .await?;

        let report = EvolutionReport {
            id: EvolutionReportId::new(),
            created_at: Utc::now(),
            objective: objective.to_string(),
            module,
            prompt_file: prompt_file.to_string(),
            proposal_labels: extract_labels(&proposals, 'G'),
            variant_labels: extract_labels(&variants, 'M'),
            generator_proposals: proposals,
            critic_notes: critiques,
            evolved_suggestions: variants,
            suggested_next_cycle: format!(
                "Review mutated variants. Select best for {} to implement. Consider deepening on M1 or broadening to another TanOS component.",
                self.user_name
            ),
        };
        self.reports.save(&report).await?;

        tracing::info!(
            report = %report.id,
            proposals = report.proposal_labels.len(),
            variants = report.variant_labels.len(),
            "G-C-M cycle complete"
        );
        Ok(report)
    }

    async fn ask(&self, system_prompt: &str, user_prompt: String) -> Result<String, AppError> {
        let response = self
            .llm
            .send_prompt(&LlmRequest::new(system_prompt, user_prompt))
            .await?;
        Ok(response)
    }

    pub async fn get_report(&self, id: &EvolutionReportId) -> Result<EvolutionReport, AppError> {
        self.reports
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("evolution report {}", id)))
    }

    pub async fn list_reports(&self) -> Result<Vec<EvolutionReportSummary>, AppError> {
        Ok(self
            .reports
            .list()
            .await?
            .iter()
            .map(EvolutionReport::summary)
            .collect())
    }
}

fn architect_system_prompt(objective: &str, target: &str, memories: &str, user: &str) -> String {
    format!(
        "You are an Architect Agent. Your mission is to embody the principles of the MEGAPROMPT Discovery Engine.\n\
         We will work together to recursively evolve TanOS, specifically the following component/prompt:\n\
         COMPONENT OBJECTIVE: {objective}\n\
         CURRENT COMPONENT PROMPT/CONTENT:\n\
         ---\n\
         {target}\n\
         ---\n\
         Relevant {user}'s MEMORIES Snippets:\n\
         ---\n\
         {memories}\n\
         ---\n\
         Your goal is to apply the Generator-Critic-Mutator (G-C-M) loop to this.\n"
    )
}

fn generator_prompt(user: &str) -> String {
    format!(
        "Now, in G_TanOS Mode (Idea Weaver):\n\
         Generate 3-5 divergent and novel proposals for improving or expanding the component described above,\n\
         addressing the specific objective. Use techniques like contradiction, metaphor injection,\n\
         domain transfer (especially from {user}'s interests like storytelling, philosophy), and analogy blending.\n\
         Focus on Novelty/Authenticity FOR {upper}, Utility/Leverage FOR TANOS & {upper}'S GOALS, and Simplicity/Flow FOR {upper}'S USE.\n\
         Output each proposal clearly labeled (G1, G2, etc.).\n",
        upper = user.to_uppercase()
    )
}

fn critic_prompt(proposals: &str, user: &str) -> String {
    format!(
        "Now, in C_TanOS Mode (Insight Valuator):\n\
         Critically evaluate EACH of the following proposals:\n\
         ---\n\
         {proposals}\n\
         ---\n\
         For each proposal, score it on:\n\
         - Novelty & Authenticity (for {user}) (0-10): (Score + Brief Rationale)\n\
         - Utility & Leverage (for TanOS & {user}'s Goals) (0-10): (Score + Brief Rationale)\n\
         - Simplicity & Flow (for {user}'s Use) (0-10): (Score + Brief Rationale)\n\
         Also, note any failure modes (too narrow, too abstract, unclear constraints, premature resolution).\n\
         Output clearly for each proposal.\n"
    )
}

fn mutator_prompt(selected: &str, user: &str) -> String {
    format!(
        "Now, in M_TanOS Mode (Evolution Catalyst):\n\
         Based on your critiques and the following selected proposals:\n\
         ---\n\
         Selected Proposals for Mutation:\n\
         {selected}\n\
         ---\n\
         Generate 1-3 new, evolved variants of the TanOS component/prompt.\n\
         Use mutation techniques such as:\n\
         - Inverting logic.\n\
         - Rewriting as a myth, poem, or diagram relevant to {user}.\n\
         - Infusing a different discipline or cultural lens (e.g., Spanish wisdom, Zen).\n\
         - Applying creative constraints (e.g., Fibonacci structuring, radical simplification).\n\
         - Reframing failures from the Critic stage into new strengths.\n\
         Output each mutated variant clearly labeled (M1, M2, etc.), showing the NEW proposed prompt text or conceptual tool description.\n"
    )
}
