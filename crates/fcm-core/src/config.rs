use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default FCM legacy HTTP endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "FCM_API_KEY";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Minimum wait between attempts in seconds (e.g. 0.5 = 500ms); also the start of the exponential curve.
    pub min_backoff_secs: f64,
    /// Maximum computed wait in seconds. A server Retry-After may exceed it.
    pub max_backoff_secs: f64,
    /// Maximum number of attempts per send (including the first).
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_backoff_secs: 1.0,
            max_backoff_secs: 10.0,
            max_attempts: 5,
        }
    }
}

/// Global configuration loaded from `~/.config/fcm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmConfig {
    /// Server key sent as `Authorization: key=...`. `FCM_API_KEY` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Multicast send endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// TCP/TLS connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout() -> u64 {
    15
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            retry: None,
        }
    }
}

impl FcmConfig {
    /// Retry policy from the `[retry]` section, or the defaults (1s / 10s / 5).
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryPolicy::from)
            .unwrap_or_default()
    }

    /// Apply `FCM_API_KEY` if set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key.trim().to_string());
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .with_context(|| format!("invalid endpoint URL: {}", self.endpoint))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!("endpoint must be http or https: {}", self.endpoint);
        }
        if let Some(retry) = &self.retry {
            if retry.max_attempts == 0 {
                bail!("retry.max_attempts must be at least 1");
            }
            let representable = |v: f64| v >= 0.0 && Duration::try_from_secs_f64(v).is_ok();
            if !representable(retry.min_backoff_secs) || !representable(retry.max_backoff_secs) {
                bail!("retry backoff values must be non-negative and fit in a duration");
            }
            if retry.min_backoff_secs > retry.max_backoff_secs {
                bail!(
                    "retry.min_backoff_secs ({}) exceeds retry.max_backoff_secs ({})",
                    retry.min_backoff_secs,
                    retry.max_backoff_secs
                );
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fcm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FcmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FcmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<FcmConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FcmConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
