//! Application configuration. API credentials, scoring limits, paths.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LEVER_API_URL: &str = "https://api.lever.co/v1";
pub const DEFAULT_AI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Concurrent scoring calls. Kept low to stay under LLM rate limits.
pub const DEFAULT_SCORING_WORKERS: usize = 2;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Lever API key. Read from LEVER_RANK_LEVER_API_KEY or LEVER_API_KEY.
    #[serde(default)]
    pub lever_api_key: Option<String>,

    /// Lever API base URL. Read from LEVER_RANK_LEVER_API_URL.
    #[serde(default)]
    pub lever_api_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Scoring Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key (e.g., OpenAI). Read from LEVER_RANK_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from LEVER_RANK_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o-mini". Read from LEVER_RANK_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Concurrent scoring workers. Read from LEVER_RANK_SCORING_WORKERS.
    #[serde(default)]
    pub scoring_workers: Option<usize>,

    /// Attempts per candidate before giving up on rate limits.
    #[serde(default)]
    pub max_scoring_attempts: Option<u32>,

    #[serde(default)]
    pub backoff_min_secs: Option<u64>,

    #[serde(default)]
    pub backoff_max_secs: Option<u64>,

    /// Per-request timeout for ATS and AI calls.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Resume downloads in flight while filtering.
    #[serde(default)]
    pub resume_fetch_concurrency: Option<usize>,

    /// Where CSV exports are written. Read from LEVER_RANK_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("LEVER_RANK").try_parsing(true));
        if let Ok(path) = std::env::var("LEVER_RANK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // LEVER_API_KEY is read directly (no prefix) so an existing .env keeps working
        if cfg.lever_api_key.is_none() {
            cfg.lever_api_key = std::env::var("LEVER_API_KEY").ok().filter(|k| !k.is_empty());
        }
        Ok(cfg)
    }

    pub fn lever_api_key(&self) -> Option<String> {
        self.lever_api_key.clone().filter(|k| !k.trim().is_empty())
    }

    pub fn lever_api_url_or_default(&self) -> String {
        self.lever_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LEVER_API_URL.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key.clone().filter(|k| !k.trim().is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
    }

    /// Returns true if AI is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scoring / concurrency helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn scoring_workers_or_default(&self) -> usize {
        self.scoring_workers
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_SCORING_WORKERS)
    }

    pub fn max_scoring_attempts_or_default(&self) -> u32 {
        self.max_scoring_attempts.filter(|&n| n > 0).unwrap_or(7)
    }

    pub fn backoff_min_or_default(&self) -> Duration {
        Duration::from_secs(self.backoff_min_secs.unwrap_or(2))
    }

    pub fn backoff_max_or_default(&self) -> Duration {
        Duration::from_secs(self.backoff_max_secs.unwrap_or(128))
    }

    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.filter(|&s| s > 0).unwrap_or(60))
    }

    pub fn resume_fetch_concurrency_or_default(&self) -> usize {
        self.resume_fetch_concurrency.filter(|&n| n > 0).unwrap_or(4)
    }

    pub fn reports_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.reports_dir.as_deref().unwrap_or("./reports"))
    }
}
