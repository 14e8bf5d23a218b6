use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything is optional; unset values fall back to persisted settings or defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Overrides the backend URL saved in the settings file.
    pub api_base: Option<String>,
    /// Per-request deadline. Unset means the client waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub settings_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: optional_env("SCREENER_API_BASE"),
            request_timeout: optional_env("SCREENER_REQUEST_TIMEOUT_SECS")
                .map(|secs| {
                    secs.parse::<u64>()
                        .context("SCREENER_REQUEST_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            settings_path: optional_env("SCREENER_SETTINGS_PATH").map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
