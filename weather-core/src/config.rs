use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::provider::openweather::DEFAULT_BASE_URL;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_BASE_URL: &str = "WEATHER_API_BASE_URL";
pub const ENV_BIND_ADDR: &str = "WEATHER_BIND_ADDR";
pub const ENV_REQUEST_TIMEOUT: &str = "WEATHER_REQUEST_TIMEOUT_SECS";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// bind_addr = "0.0.0.0:8000"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// OpenWeather `appid`.
    pub api_key: Option<String>,

    /// Upstream base URL, defaults to the public OpenWeather 2.5 API.
    pub base_url: Option<String>,

    /// Address the HTTP server listens on.
    pub bind_addr: Option<String>,

    /// Per-request timeout for upstream calls. No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-gateway", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`; variables that are unset or empty leave the field alone.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.bind_addr = Some(addr);
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().with_context(|| {
                format!("{ENV_REQUEST_TIMEOUT} must be a whole number of seconds, got '{raw}'")
            })?;
            self.request_timeout_secs = Some(secs);
        }

        Ok(self)
    }

    /// API key, empty when none is configured.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().is_empty()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
