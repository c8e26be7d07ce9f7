//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod fs;
pub mod llm;

pub use fs::{
    FsChangelogRepository, FsEvolutionReportRepository, FsMemoryRepository, FsPromptRepository,
    FsStateRepository,
};
pub use llm::LlmProvider;
