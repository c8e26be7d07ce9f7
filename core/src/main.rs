//! TanOS
//!
//! A personal AI copilot ("Nomad") run from the command line. Module prompts,
//! MEMORIES and the Captain's Log state live on disk; an LLM provider turns
//! them into responses.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod adapters;
mod app;
mod cli;
mod config;
mod domain;
mod error;
mod handlers;
mod render;

#[cfg(test)]
mod test_utils;


use adapters::{
    FsChangelogRepository, FsEvolutionReportRepository, FsMemoryRepository, FsPromptRepository,
    FsStateRepository, LlmProvider,
};
use app::{
    ArchitectService, CaptainsLogService, ChangelogService, Clock, HealthService, MemoryService,
    ModuleOrchestrator, PromptService,
};
use cli::Cli;
use config::Config;
use error::{AppError, DomainError};

pub type Orchestrator = ModuleOrchestrator<
    FsStateRepository,
    FsMemoryRepository,
    FsChangelogRepository,
    FsPromptRepository,
    LlmProvider,
>;

pub type Architect =
    ArchitectService<FsMemoryRepository, FsPromptRepository, FsEvolutionReportRepository, LlmProvider>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub captains_log: Arc<CaptainsLogService<FsStateRepository>>,
    pub health: Arc<HealthService<FsStateRepository>>,
    pub memories: Arc<MemoryService<FsMemoryRepository>>,
    pub changelog: Arc<ChangelogService<FsChangelogRepository>>,
    pub prompts: Arc<PromptService<FsPromptRepository>>,
    pub orchestrator: Arc<Orchestrator>,
    pub architect: Arc<Architect>,
    pub llm: Arc<LlmProvider>,
    pub config: Config,
}

impl AppState {
    /// Wire filesystem adapters, the LLM provider and services
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let clock = Clock::new(config.utc_offset);
        let user_name = config.user_name.clone();

        // Create adapters
        let state_repo = Arc::new(FsStateRepository::new(
            config.state_file(),
            config.health_log_file(),
        ));
        let memory_repo = Arc::new(FsMemoryRepository::new(
            config.memories_dir(),
            config.memory_suggestions_file(),
        ));
        let changelog_repo = Arc::new(FsChangelogRepository::new(config.changelog_file()));
        let prompt_repo = Arc::new(FsPromptRepository::new(config.prompts_dir.clone()));
        let report_repo = Arc::new(FsEvolutionReportRepository::new(
            config.architect_reports_dir(),
        ));
        let llm = Arc::new(LlmProvider::from_config(&config.llm)?);

        // Create application services
        let captains_log = Arc::new(CaptainsLogService::new(
            state_repo.clone(),
            clock,
            user_name.clone(),
        ));
        let health = Arc::new(HealthService::new(
            state_repo,
            clock,
            config.health.clone(),
        ));
        let memories = Arc::new(MemoryService::new(memory_repo));
        let changelog = Arc::new(ChangelogService::new(
            changelog_repo,
            clock,
            user_name.clone(),
        ));
        let prompts = Arc::new(PromptService::new(prompt_repo, user_name.clone()));

        let orchestrator = Arc::new(ModuleOrchestrator::new(
            captains_log.clone(),
            health.clone(),
            memories.clone(),
            changelog.clone(),
            prompts.clone(),
            llm.clone(),
            user_name.clone(),
        ));

        let architect = Arc::new(ArchitectService::new(
            memories.clone(),
            prompts.clone(),
            report_repo,
            llm.clone(),
            user_name,
        ));

        Ok(Self {
            captains_log,
            health,
            memories,
            changelog,
            prompts,
            orchestrator,
            architect,
            llm,
            config,
        })
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn,tanos=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let config = Config::from_env();
    config
        .ensure_data_dirs()
        .await
        .map_err(|e| AppError::Internal(format!("could not create data directories: {}", e)))?;

    let state = AppState::from_config(config)?;
    handlers::run(&state, cli.command, cli.json).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            match &e {
                AppError::Llm(err) => tracing::error!("LLM error: {}", err),
                AppError::Domain(DomainError::Storage(msg)) => {
                    tracing::error!("Storage error: {}", msg)
                }
                _ => tracing::debug!(error = %e, "command failed"),
            }
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
