//! Application layer
//!
//! Services coordinate between domain entities, ports and the LLM.

pub mod architect_service;
pub mod captains_log_service;
pub mod changelog_service;
pub mod clock;
pub mod health_service;
pub mod memory_service;
pub mod orchestrator;
pub mod prompt_service;

pub use architect_service::ArchitectService;
pub use captains_log_service::CaptainsLogService;
pub use changelog_service::ChangelogService;
pub use clock::Clock;
pub use health_service::HealthService;
pub use memory_service::MemoryService;
pub use orchestrator::{HealthLogOutcome, ModuleOrchestrator};
pub use prompt_service::PromptService;
