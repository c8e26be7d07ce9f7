//! Render module
//!
//! Plain-text console rendering for CLI output.

pub mod renderer;

pub use renderer::{
    render_changelog, render_config, render_evolution_report, render_health_input,
    render_health_outcome, render_interaction, render_memory, render_report_list, render_state,
    render_suggestions, render_tool_session, ConfigView,
};
