//! Health and subjective-state entities for CrowsNest

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Whether supplements were taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplementStatus {
    Yes,
    No,
    Partial,
}

/// Adherence to the no-carb/high-protein diet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietStatus {
    On,
    Partial,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirmation {
    Yes,
    No,
}

impl std::fmt::Display for SupplementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplementStatus::Yes => write!(f, "yes"),
            SupplementStatus::No => write!(f, "no"),
            SupplementStatus::Partial => write!(f, "partial"),
        }
    }
}

impl std::str::FromStr for SupplementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" | "y" => Ok(SupplementStatus::Yes),
            "no" | "n" => Ok(SupplementStatus::No),
            "partial" => Ok(SupplementStatus::Partial),
            _ => Err(format!("expected yes, no or partial, got '{}'", s)),
        }
    }
}

impl std::fmt::Display for DietStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DietStatus::On => write!(f, "on"),
            DietStatus::Partial => write!(f, "partial"),
            DietStatus::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for DietStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(DietStatus::On),
            "partial" => Ok(DietStatus::Partial),
            "off" => Ok(DietStatus::Off),
            _ => Err(format!("expected on, partial or off, got '{}'", s)),
        }
    }
}

impl std::fmt::Display for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confirmation::Yes => write!(f, "yes"),
            Confirmation::No => write!(f, "no"),
        }
    }
}

impl std::str::FromStr for Confirmation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" | "y" => Ok(Confirmation::Yes),
            "no" | "n" => Ok(Confirmation::No),
            _ => Err(format!("expected yes or no, got '{}'", s)),
        }
    }
}

/// One check-in of health metrics and subjective state. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhr: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub am_supps: Option<SupplementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_supps: Option<SupplementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_track: Option<DietStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tretinoin: Option<Confirmation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<u8>,
}

impl HealthReport {
    /// Labelled values in display order, skipping unset metrics
    pub fn labelled_values(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let mut push = |label: &'static str, value: Option<String>| {
            if let Some(v) = value {
                out.push((label, v));
            }
        };

        push("Sleep Quality", self.sleep_quality.map(format_number));
        push("Sleep Hours", self.sleep_hours.map(format_number));
        push("Hrv", self.hrv.map(|v| v.to_string()));
        push("Rhr", self.rhr.map(|v| v.to_string()));
        push("Am Supps", self.am_supps.map(|v| v.to_string()));
        push("Pm Supps", self.pm_supps.map(|v| v.to_string()));
        push("Diet Track", self.diet_track.map(|v| v.to_string()));
        push("Tretinoin", self.tretinoin.map(|v| v.to_string()));
        push("Mood", self.mood.clone());
        push("Energy", self.energy.map(|v| v.to_string()));
        push("Stress", self.stress.map(|v| v.to_string()));
        out
    }

    pub fn is_empty(&self) -> bool {
        self.labelled_values().is_empty()
    }

    /// `Sleep Quality: 8; Sleep Hours: 7; Mood: Neutral`
    pub fn summary_line(&self) -> String {
        self.labelled_values()
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Mood/energy summary for the Captain's Log, if either was reported
    pub fn mood_energy_summary(&self) -> Option<String> {
        let mood = self.mood.as_deref().map(str::trim).filter(|m| !m.is_empty());
        match (mood, self.energy) {
            (Some(mood), Some(energy)) => Some(format!("{}, Energy {}/10", mood, energy)),
            (Some(mood), None) => Some(mood.to_string()),
            (None, Some(energy)) => Some(format!("Energy {}/10", energy)),
            (None, None) => None,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        check_score("sleep quality", self.sleep_quality)?;
        check_score("energy", self.energy.map(f32::from))?;
        check_score("stress", self.stress.map(f32::from))?;

        if let Some(hours) = self.sleep_hours {
            if !(0.0..=24.0).contains(&hours) {
                return Err(DomainError::Validation(format!(
                    "sleep hours must be between 0 and 24, got {}",
                    hours
                )));
            }
        }

        if let Some(hrv) = self.hrv {
            if hrv == 0 || hrv > 300 {
                return Err(DomainError::Validation(format!(
                    "HRV must be between 1 and 300 ms, got {}",
                    hrv
                )));
            }
        }

        if let Some(rhr) = self.rhr {
            if !(20..=250).contains(&rhr) {
                return Err(DomainError::Validation(format!(
                    "resting heart rate must be between 20 and 250 bpm, got {}",
                    rhr
                )));
            }
        }

        Ok(())
    }
}

fn check_score(label: &str, value: Option<f32>) -> Result<(), DomainError> {
    match value {
        Some(v) if !(1.0..=10.0).contains(&v) => Err(DomainError::Validation(format!(
            "{} must be between 1 and 10, got {}",
            label, v
        ))),
        _ => Ok(()),
    }
}

/// Render whole numbers without a trailing `.0`
fn format_number(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// A report as stored in the health history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogEntry {
    /// Calendar day in the user's offset
    pub date: NaiveDate,
    pub logged_at: DateTime<Utc>,
    pub report: HealthReport,
}
