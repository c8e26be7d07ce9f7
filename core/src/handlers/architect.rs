//! ArchitectOS handlers
//!
//! Run Generator-Critic-Mutator (G-C-M) cycles against module prompts and
//! browse the stored reports.

use super::to_json;
use crate::domain::entities::{EvolutionReport, EvolutionReportId, TanosModule};
use crate::error::AppError;
use crate::render::{render_evolution_report, render_report_list};
use crate::AppState;

pub async fn evolve_prompt(
    state: &AppState,
    module: TanosModule,
    prompt_file: &str,
    objective: &str,
    json: bool,
) -> Result<String, AppError> {
    let report = state
        .architect
        .run_gcm_cycle(objective, module, prompt_file)
        .await?;
    report_output(state, &report, json)
}

pub async fn list_reports(state: &AppState, json: bool) -> Result<String, AppError> {
    let reports = state.architect.list_reports().await?;
    if json {
        return to_json(&reports);
    }
    Ok(render_report_list(&reports))
}

pub async fn view_report(state: &AppState, id: &EvolutionReportId, json: bool) -> Result<String, AppError> {
    let report = state.architect.get_report(id).await?;
    report_output(state, &report, json)
}

fn report_output(state: &AppState, report: &EvolutionReport, json: bool) -> Result<String, AppError> {
    if json {
        return to_json(report);
    }
    let prompt_path = state
        .prompts
        .describe(report.module.dir_name(), &report.prompt_file);
    Ok(render_evolution_report(report, &prompt_path))
}
