use clap::{Args, Parser, Subcommand};

use crate::domain::entities::{
    Confirmation, DietStatus, EvolutionReportId, HealthReport, MemoryKey, SectionPath,
    SupplementStatus, TanosModule,
};

#[derive(Parser, Debug)]
#[command(
    name = "tanos",
    about = "TanOS: a personal AI copilot and operating system, run by Nomad"
)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Output machine-readable JSON where applicable")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interact with a TanOS module
    Interact {
        #[arg(long, help = "CaptainsLog, ChartRoom, Workshop, PhilosophersPorch or CrowsNest")]
        module: TanosModule,
        #[arg(long, help = "Your query or input for the module")]
        input: String,
    },
    /// Log health and subjective state data for CrowsNest
    LogHealth(HealthArgs),
    /// View the current Captain's Log operational state
    ViewState,
    /// Set a Captain's Log state variable (VALUE is JSON, or a plain string)
    SetState { key: String, value: String },
    /// Update your current location
    SetLocation { location: String },
    /// Update your mood/energy summary
    SetMood { summary: String },
    /// Add or replace an active project
    AddProject {
        name: String,
        #[arg(long, default_value = "Planned")]
        status: String,
        #[arg(long, default_value = "")]
        milestone: String,
        #[arg(long, default_value = "")]
        next_step: String,
    },
    /// Record a key insight
    AddInsight { summary: String },
    /// Record a pending decision
    AddDecision {
        name: String,
        #[arg(long)]
        transformative: bool,
    },
    /// View a structured MEMORIES document or one section of it
    ViewMemory {
        key: MemoryKey,
        #[arg(long, help = "Section path, e.g. 'Core Values/Freedom'")]
        section: Option<SectionPath>,
    },
    /// Suggest a manual update to a MEMORIES document
    SuggestMemory {
        #[arg(long)]
        key: MemoryKey,
        #[arg(long)]
        change: String,
        #[arg(long)]
        section: Option<SectionPath>,
    },
    /// List pending memory update suggestions
    ListSuggestions,
    /// View recent entries from Nomad's changelog
    ViewChangelog {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Draft the text for the next changelog entry
    DraftChangelogEntry {
        #[arg(long)]
        summary: String,
        #[arg(long, default_value = "", help = "Comma-separated impacted modules")]
        impacted: String,
        #[arg(long, default_value = "", help = "Comma-separated files you will update")]
        files: String,
        #[arg(long, help = "Version to increment (defaults to the latest recorded)")]
        current_version: Option<String>,
    },
    /// Add an entry to Nomad's changelog after updating prompts
    AddChangelogEntry {
        #[arg(long, help = "New version string (e.g., 0.3.1)")]
        version: String,
        #[arg(long)]
        summary: String,
        #[arg(long, help = "Comma-separated impacted modules (e.g., ChartRoom,Workshop)")]
        impacted: String,
        #[arg(long, help = "Comma-separated files updated")]
        files_updated: String,
    },
    /// Engage ArchitectOS to evolve a module prompt
    EvolvePrompt {
        #[arg(long)]
        module: TanosModule,
        #[arg(long, help = "Prompt filename within the module directory")]
        file: String,
        #[arg(long, help = "What the evolved prompt should improve")]
        objective: String,
    },
    /// List stored ArchitectOS reports
    ListReports,
    /// Show a stored ArchitectOS report
    ViewReport { id: EvolutionReportId },
    /// Start a Workshop conceptual tool
    UseTool {
        #[arg(long, help = "Tool prompt filename under Workshop/Tools")]
        file: String,
        #[arg(long)]
        input: String,
    },
    /// Create data directories, placeholder memories and module prompt skeletons
    Init,
    /// Show resolved paths and LLM provider
    ShowConfig,
}

#[derive(Args, Debug, Default)]
pub struct HealthArgs {
    #[arg(long, help = "Sleep quality (1-10)")]
    pub sleep_quality: Option<f32>,
    #[arg(long, help = "Hours slept")]
    pub sleep_hours: Option<f32>,
    #[arg(long, help = "Morning HRV (ms)")]
    pub hrv: Option<u32>,
    #[arg(long, help = "Morning resting heart rate")]
    pub rhr: Option<u32>,
    #[arg(long, help = "AM supplements taken? (yes, no, partial)")]
    pub am_supps: Option<SupplementStatus>,
    #[arg(long, help = "PM supplements taken? (yes, no, partial)")]
    pub pm_supps: Option<SupplementStatus>,
    #[arg(long, help = "Diet status (on, partial, off)")]
    pub diet_track: Option<DietStatus>,
    #[arg(long, help = "Tretinoin applied? (yes, no)")]
    pub tretinoin: Option<Confirmation>,
    #[arg(long, help = "Current mood (e.g., Spring expansive, Neutral, Stressed)")]
    pub mood: Option<String>,
    #[arg(long, help = "Energy level (1-10)")]
    pub energy: Option<u8>,
    #[arg(long, help = "Stress level (1-10)")]
    pub stress: Option<u8>,
}

impl From<HealthArgs> for HealthReport {
    fn from(args: HealthArgs) -> Self {
        HealthReport {
            sleep_quality: args.sleep_quality,
            sleep_hours: args.sleep_hours,
            hrv: args.hrv,
            rhr: args.rhr,
            am_supps: args.am_supps,
            pm_supps: args.pm_supps,
            diet_track: args.diet_track,
            tretinoin: args.tretinoin,
            mood: args.mood,
            energy: args.energy,
            stress: args.stress,
        }
    }
}

/// Split a comma-separated option into trimmed, non-empty items
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
