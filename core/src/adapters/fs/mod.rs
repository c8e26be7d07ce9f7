//! Filesystem adapter
//!
//! JSON (and YAML, for memories) documents under the TanOS data and prompt
//! directories.

pub mod changelog_repo;
pub mod json_file;
pub mod memory_repo;
pub mod prompt_repo;
pub mod report_repo;
pub mod state_repo;

pub use changelog_repo::FsChangelogRepository;
pub use memory_repo::FsMemoryRepository;
pub use prompt_repo::FsPromptRepository;
pub use report_repo::FsEvolutionReportRepository;
pub use state_repo::FsStateRepository;
