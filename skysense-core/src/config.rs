use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherbit.io/v2.0/forecast/daily";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "SKYSENSE_API_KEY";
pub const ENV_BASE_URL: &str = "SKYSENSE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SKYSENSE_TIMEOUT_SECS";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.weatherbit.io/v2.0/forecast/daily"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk and apply `SKYSENSE_*` environment overrides.
    pub fn load() -> Result<Self> {
        let cfg = Self::load_file()?;
        Ok(cfg.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay values found through `lookup` (normally the process environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(_) => tracing::warn!(
                    value = %raw,
                    "ignoring {ENV_TIMEOUT_SECS}: not a whole number of seconds"
                ),
            }
        }

        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
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

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skysense", "skysense")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, or an error explaining how to provide one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `skysense configure` or set {ENV_API_KEY}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
