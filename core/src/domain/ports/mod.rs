//! Domain ports (traits)
//!
//! Port traits define the persistence and LLM interfaces the services need.
//! Adapters provide the filesystem and HTTP implementations.

pub mod llm;
pub mod repositories;

pub use llm::{LlmClient, LlmRequest};
pub use repositories::{
    ChangelogRepository, EvolutionReportRepository, MemoryRepository, PromptRepository,
    StateRepository,
};
