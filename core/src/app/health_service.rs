//! CrowsNest health tracking
//!
//! Keeps a rolling history of check-ins and derives the Captain's Log
//! health flags from it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::clock::Clock;
use crate::config::HealthThresholds;
use crate::domain::entities::{HealthLogEntry, HealthReport};
use crate::domain::ports::StateRepository;
use crate::error::AppError;

/// Check-ins kept in the history
pub const MAX_HEALTH_HISTORY: usize = 60;

pub const NO_FLAGS: &str = "No flags active";

pub struct HealthService<SR>
where
    SR: StateRepository,
{
    repo: Arc<SR>,
    clock: Clock,
    thresholds: HealthThresholds,
}

impl<SR> HealthService<SR>
where
    SR: StateRepository,
{
    pub fn new(repo: Arc<SR>, clock: Clock, thresholds: HealthThresholds) -> Self {
        Self {
            repo,
            clock,
            thresholds,
        }
    }

    /// Validate and store a check-in, returning the recomputed flags
    pub async fn record(&self, report: HealthReport) -> Result<String, AppError> {
        if report.is_empty() {
            return Err(AppError::BadRequest("no health data provided".to_string()));
        }
        report.validate()?;

        let mut history = self.repo.load_health_log().await?;
        history.push(HealthLogEntry {
            date: self.clock.today(),
            logged_at: Utc::now(),
            report,
        });
        if history.len() > MAX_HEALTH_HISTORY {
            let excess = history.len() - MAX_HEALTH_HISTORY;
            history.drain(..excess);
        }
        self.repo.save_health_log(&history).await?;

        let flags = compute_flags(&history, &self.thresholds);
        tracing::info!(entries = history.len(), flags = %flags, "health check-in recorded");
        Ok(flags)
    }

    pub async fn history(&self) -> Result<Vec<HealthLogEntry>, AppError> {
        Ok(self.repo.load_health_log().await?)
    }
}

/// Flags raised when the most recent readings sit below threshold on
/// `consecutive_days` back-to-back calendar days
pub fn compute_flags(history: &[HealthLogEntry], thresholds: &HealthThresholds) -> String {
    let days = thresholds.consecutive_days.max(1);
    let mut flags = Vec::new();

    let hrv = latest_per_day(history, |r| r.hrv.map(f64::from));
    if below_for_consecutive_days(&hrv, f64::from(thresholds.hrv_yellow_ms), days) {
        flags.push(format!(
            "HRV Yellow (<{}ms for {} consecutive days)",
            thresholds.hrv_yellow_ms, days
        ));
    }

    let sleep = latest_per_day(history, |r| r.sleep_quality.map(f64::from));
    if below_for_consecutive_days(&sleep, f64::from(thresholds.sleep_yellow_score), days) {
        flags.push(format!(
            "Sleep Yellow (quality <{}/10 for {} consecutive days)",
            thresholds.sleep_yellow_score, days
        ));
    }

    if flags.is_empty() {
        NO_FLAGS.to_string()
    } else {
        flags.join("; ")
    }
}

/// Last reading of each day; later check-ins override earlier ones
fn latest_per_day<F>(history: &[HealthLogEntry], metric: F) -> BTreeMap<NaiveDate, f64>
where
    F: Fn(&HealthReport) -> Option<f64>,
{
    let mut by_day = BTreeMap::new();
    for entry in history {
        if let Some(value) = metric(&entry.report) {
            by_day.insert(entry.date, value);
        }
    }
    by_day
}

fn below_for_consecutive_days(by_day: &BTreeMap<NaiveDate, f64>, threshold: f64, days: usize) -> bool {
    let recent: Vec<(&NaiveDate, &f64)> = by_day.iter().rev().take(days).collect();
    if recent.len() < days {
        return false;
    }

    let contiguous = recent
        .windows(2)
        .all(|pair| pair[0].0.signed_duration_since(*pair[1].0).num_days() == 1);

    contiguous && recent.iter().all(|(_, v)| **v < threshold)
}
