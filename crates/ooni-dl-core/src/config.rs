use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::query::DEFAULT_API_URL;

/// Backoff parameters (`[backoff]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Delay in seconds before the first request of the run.
    pub initial_delay_secs: f64,
    /// Seconds taken off the delay after each success.
    pub success_step_secs: f64,
    /// Minimum delay in seconds after a failed attempt.
    pub min_failure_delay_secs: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_secs: 0.1,
            success_step_secs: 0.01,
            min_failure_delay_secs: 0.01,
        }
    }
}

/// Global configuration loaded from `~/.config/ooni-dl/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OoniConfig {
    /// Listing endpoint; `--get-arguments` is appended to it verbatim.
    pub api_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    pub backoff: BackoffConfig,
}

impl Default for OoniConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("ooni-dl/", env!("CARGO_PKG_VERSION")).to_string(),
            backoff: BackoffConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("backoff.max_attempts must be at least 1")]
    NoAttempts,
    #[error("backoff.{field} must be a finite, non-negative number of seconds (got {value})")]
    BadDelay { field: &'static str, value: f64 },
    #[error("api_url must not be empty")]
    EmptyApiUrl,
}

impl OoniConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        let b = &self.backoff;
        if b.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        for (field, value) in [
            ("initial_delay_secs", b.initial_delay_secs),
            ("success_step_secs", b.success_step_secs),
            ("min_failure_delay_secs", b.min_failure_delay_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadDelay { field, value });
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ooni-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<OoniConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OoniConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<OoniConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: OoniConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
