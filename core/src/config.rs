use std::env;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};

#[derive(Clone, Debug)]
pub struct Config {
    pub prompts_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Name used when addressing the user in prompts and rendered state
    pub user_name: String,
    /// Offset used for the Captain's Log clock
    pub utc_offset: FixedOffset,
    pub llm: LlmConfig,
    pub health: HealthThresholds,
}

/// LLM provider selection and per-provider settings
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// One of: mock, openai, anthropic, ollama
    pub provider: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub mock_delay_ms: u64,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
}

/// Yellow-flag thresholds for CrowsNest health tracking
#[derive(Clone, Debug, PartialEq)]
pub struct HealthThresholds {
    /// HRV below this many milliseconds counts toward the HRV flag
    pub hrv_yellow_ms: u32,
    /// Sleep quality below this score counts toward the sleep flag
    pub sleep_yellow_score: f32,
    pub consecutive_days: usize,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            hrv_yellow_ms: 45,
            sleep_yellow_score: 6.0,
            consecutive_days: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let utc_offset = lookup("TANOS_UTC_OFFSET")
            .and_then(|v| parse_utc_offset(&v))
            .unwrap_or_else(default_offset);

        let defaults = HealthThresholds::default();

        Self {
            prompts_dir: PathBuf::from(var_or("TANOS_PROMPTS_DIR", "tanos_prompts")),
            data_dir: PathBuf::from(var_or("TANOS_DATA_DIR", "tanos_data")),
            user_name: var_or("TANOS_USER", "Tan"),
            utc_offset,
            llm: LlmConfig {
                provider: var_or("LLM_PROVIDER", "mock").trim().to_lowercase(),
                max_tokens: parse_or(lookup("LLM_MAX_TOKENS"), 2000),
                temperature: parse_or(lookup("LLM_TEMPERATURE"), 0.7),
                timeout_secs: parse_or(lookup("LLM_TIMEOUT_SECS"), 120),
                mock_delay_ms: parse_or(lookup("MOCK_LLM_DELAY_MS"), 100),
                openai_api_key: non_empty("OPENAI_API_KEY"),
                openai_base_url: var_or("OPENAI_BASE_URL", "https://api.openai.com"),
                openai_model: var_or("OPENAI_MODEL", "gpt-4o"),
                anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
                anthropic_base_url: var_or("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
                anthropic_model: var_or("ANTHROPIC_MODEL", "claude-3-5-sonnet-20240620"),
                ollama_base_url: var_or("OLLAMA_BASE_URL", "http://localhost:11434"),
                ollama_model: var_or("OLLAMA_MODEL_NAME", "llama3"),
            },
            health: HealthThresholds {
                hrv_yellow_ms: parse_or(lookup("TAN_HRV_YELLOW_FLAG_MS"), defaults.hrv_yellow_ms),
                sleep_yellow_score: parse_or(
                    lookup("TAN_SLEEP_YELLOW_FLAG_SCORE"),
                    defaults.sleep_yellow_score,
                ),
                consecutive_days: parse_or(
                    lookup("TAN_FLAG_CONSECUTIVE_DAYS"),
                    defaults.consecutive_days,
                )
                .max(1),
            },
        }
    }

    pub fn memories_dir(&self) -> PathBuf {
        self.data_dir.join("memories")
    }

    pub fn operational_state_dir(&self) -> PathBuf {
        self.data_dir.join("operational_state")
    }

    pub fn changelogs_dir(&self) -> PathBuf {
        self.data_dir.join("changelogs")
    }

    pub fn architect_reports_dir(&self) -> PathBuf {
        self.data_dir.join("architect_reports")
    }

    pub fn state_file(&self) -> PathBuf {
        self.operational_state_dir().join("captains_log_state.json")
    }

    pub fn health_log_file(&self) -> PathBuf {
        self.operational_state_dir().join("health_log.json")
    }

    pub fn memory_suggestions_file(&self) -> PathBuf {
        self.operational_state_dir().join("memory_suggestions.json")
    }

    pub fn changelog_file(&self) -> PathBuf {
        self.changelogs_dir().join("nomad_changelog.json")
    }

    /// Create the data directories if they don't exist
    pub async fn ensure_data_dirs(&self) -> std::io::Result<()> {
        for dir in [
            self.memories_dir(),
            self.operational_state_dir(),
            self.changelogs_dir(),
            self.architect_reports_dir(),
        ] {
            ensure_dir(&dir).await?;
        }
        Ok(())
    }
}

async fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        tokio::fs::create_dir_all(dir).await?;
        tracing::debug!(path = %dir.display(), "created data directory");
    }
    Ok(())
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn default_offset() -> FixedOffset {
    // Europe/Madrid standard time
    FixedOffset::east_opt(3600).unwrap_or_else(utc)
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse offsets like `+01:00`, `-0530`, `Z` or `UTC`
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(utc());
    }

    let (sign, rest) = match raw.chars().next()? {
        '+' => (1, &raw[1..]),
        '-' => (-1, &raw[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
