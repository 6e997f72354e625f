// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::application::ScreenOptions;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL};

/// TOML configuration for the notes screen
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub screen: ScreenOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout; unset or 0 means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// `<config_dir>/notes-screen/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load `explicit` if given (it must exist), otherwise the default file if
    /// present, otherwise built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default location");
                Self::load(&path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{BusyPolicy, ResponseOrdering};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_no_settings_when_defaulting_then_uses_compiled_in_endpoint() {
        let config = Config::default();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.screen.busy_policy, BusyPolicy::Shared);
        assert_eq!(config.screen.response_ordering, ResponseOrdering::LastResolved);
    }

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let toml_content = r#"
[api]
base_url = "http://localhost:5836/api"
timeout_secs = 10

[screen]
busy_policy = "per-operation"
response_ordering = "latest-issued"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:5836/api");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.screen.busy_policy, BusyPolicy::PerOperation);
        assert_eq!(config.screen.response_ordering, ResponseOrdering::LatestIssued);
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");

        fs::write(&config_path, "[screen]\nbusy_policy = \"per-operation\"\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.screen.busy_policy, BusyPolicy::PerOperation);
        assert_eq!(config.screen.response_ordering, ResponseOrdering::LastResolved);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn given_zero_timeout_when_resolving_duration_then_no_timeout() {
        let api = ApiConfig {
            timeout_secs: Some(0),
            ..ApiConfig::default()
        };

        assert_eq!(api.timeout(), None);
    }

    #[test]
    fn given_unknown_policy_when_loading_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[screen]\nbusy_policy = \"sometimes\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn given_missing_explicit_path_when_resolving_then_returns_error() {
        let result = Config::resolve(Some(Path::new("/nonexistent/path/config.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_saved_config_when_loading_then_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("saved.toml");
        let original = Config {
            api: ApiConfig {
                base_url: "http://127.0.0.1:9000/api".to_string(),
                timeout_secs: Some(3),
            },
            screen: ScreenOptions {
                busy_policy: BusyPolicy::PerOperation,
                response_ordering: ResponseOrdering::LatestIssued,
            },
        };

        original.save(&config_path).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        let loaded = Config::load(&config_path).unwrap();

        assert!(content.contains("[api]"));
        assert!(content.contains("[screen]"));
        assert_eq!(loaded, original);
    }
}
