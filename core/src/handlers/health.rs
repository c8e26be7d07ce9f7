//! CrowsNest health check-in handler

use serde_json::json;

use super::to_json;
use crate::domain::entities::HealthReport;
use crate::error::AppError;
use crate::render::{render_health_input, render_health_outcome};
use crate::AppState;

pub async fn log_health(state: &AppState, report: HealthReport, json: bool) -> Result<String, AppError> {
    if report.is_empty() {
        tracing::info!("log-health called without any metrics");
        if json {
            return to_json(&json!({ "logged": false }));
        }
        return Ok(format!(
            "{}\nNo health data provided to log.",
            render_health_input(&report)
        ));
    }

    report.validate()?;
    let echo = render_health_input(&report);
    let outcome = state.orchestrator.log_health_metrics(report).await?;

    if json {
        return to_json(&json!({ "logged": true, "outcome": outcome }));
    }
    Ok(format!("{}\n{}", echo, render_health_outcome(&outcome)))
}
