use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "JOURNAL_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Base URL of the journal service, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Tracing filter used when `JOURNAL_LOG` is unset, e.g. "debug" or "journal_api=trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
        }
    }
}

impl JournalConfig {
    fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("journal-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("journal-tui.log"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Apply the environment and command-line overrides, flag winning over env.
    pub fn with_overrides(mut self, env_url: Option<String>, flag_url: Option<String>) -> Self {
        if let Some(url) = flag_url.or(env_url).filter(|url| !url.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = JournalConfig::parse("").unwrap();
        assert_eq!(config, JournalConfig::default());

        let config = JournalConfig::parse("api_url = \"http://journal:9000\"").unwrap();
        assert_eq!(config.api_url, "http://journal:9000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = JournalConfig {
            api_url: "https://journal.example".to_string(),
            log_level: "debug".to_string(),
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        assert_eq!(JournalConfig::parse(&raw).unwrap(), config);
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let base = JournalConfig::default();

        let from_env = base
            .clone()
            .with_overrides(Some("http://env:1".to_string()), None);
        assert_eq!(from_env.api_url, "http://env:1");

        let from_flag = base.clone().with_overrides(
            Some("http://env:1".to_string()),
            Some("http://flag:2".to_string()),
        );
        assert_eq!(from_flag.api_url, "http://flag:2");

        let blank = base.with_overrides(Some("  ".to_string()), None);
        assert_eq!(blank.api_url, "http://localhost:8080");
    }
}
