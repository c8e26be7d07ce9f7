//! Domain entities
//!
//! Plain data types shared by services, adapters and handlers.

pub mod changelog;
pub mod evolution;
pub mod health;
pub mod memory;
pub mod module;
pub mod state;

pub use changelog::{next_patch_version, ChangelogEntry, NewChangelogEntry, DEFAULT_NOMAD_VERSION};
pub use evolution::{extract_labels, EvolutionReport, EvolutionReportId, EvolutionReportSummary};
pub use health::{Confirmation, DietStatus, HealthLogEntry, HealthReport, SupplementStatus};
pub use memory::{MemoryKey, MemorySuggestion, SectionPath, SectionSegment, CORE_MEMORY_KEYS};
pub use module::TanosModule;
pub use state::{ActiveProject, CaptainsLogState, Insight, PendingDecision, MAX_RECENT_INSIGHTS};
