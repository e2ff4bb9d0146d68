use std::time::Duration;

use anyhow::{Context, Result};

/// Default maximum upload size: 10 MiB.
const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: usize,
    /// Wall-clock budget for turning one document into text.
    pub parsing_timeout_secs: u64,
    /// Wall-clock budget for a single field strategy.
    pub strategy_timeout_secs: u64,
    /// Aggregate budget for the whole extraction fan-out.
    pub coordinator_budget_secs: u64,
    /// Retries for transient LLM failures (on top of the first attempt).
    pub llm_max_retries: u32,
    /// Base delay for the exponential LLM retry backoff.
    pub llm_retry_base_delay_ms: u64,
    /// MIME types the validation gate admits.
    pub allowed_content_types: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            max_file_size: env_or("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE)?,
            parsing_timeout_secs: env_or("PARSING_TIMEOUT_SECS", 30)?,
            strategy_timeout_secs: env_or("STRATEGY_TIMEOUT_SECS", 10)?,
            coordinator_budget_secs: env_or("COORDINATOR_BUDGET_SECS", 20)?,
            llm_max_retries: env_or("LLM_MAX_RETRIES", 2)?,
            llm_retry_base_delay_ms: env_or("LLM_RETRY_BASE_DELAY_MS", 1000)?,
            allowed_content_types: allowed_content_types_from_env(),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn parsing_timeout(&self) -> Duration {
        Duration::from_secs(self.parsing_timeout_secs)
    }

    pub fn strategy_timeout(&self) -> Duration {
        Duration::from_secs(self.strategy_timeout_secs)
    }

    pub fn coordinator_budget(&self) -> Duration {
        Duration::from_secs(self.coordinator_budget_secs)
    }
}

fn allowed_content_types_from_env() -> Vec<String> {
    match std::env::var("ALLOWED_CONTENT_TYPES") {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => DEFAULT_ALLOWED_CONTENT_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
