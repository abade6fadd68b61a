//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `~/.config/gitlab-emails/config.toml`
//! 4. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{self, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::env::Env;
use crate::models::ReportFormat;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
}

/// REST API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Users requested per page (1..=100).
    pub per_page: u32,
    /// Per-request timeout; `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
    /// Overrides the default `User-Agent` header.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

/// Report settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,
}

impl Config {
    /// Load configuration from the global config file and the environment.
    pub fn load(env: &Env) -> Result<Self, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), env)
    }

    /// Load configuration using an explicit config file path.
    ///
    /// A missing file is not an error; built-in defaults apply.
    pub fn load_from(path: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = path {
            if path.exists() {
                let file = Self::load_file(path)?;
                config.merge(file);
            }
        }

        config.apply_env_vars(env);
        config.validate()?;

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join(constants::CONFIG_FILENAME))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_api = ApiConfig::default();
        if other.api.per_page != default_api.per_page {
            self.api.per_page = other.api.per_page;
        }
        if other.api.timeout_secs.is_some() {
            self.api.timeout_secs = other.api.timeout_secs;
        }
        if other.api.user_agent.is_some() {
            self.api.user_agent = other.api.user_agent;
        }

        if other.output.format != OutputConfig::default().format {
            self.output.format = other.output.format;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(constants::ENV_FORMAT) {
            match val.parse::<ReportFormat>() {
                Ok(format) => self.output.format = format,
                Err(_) => tracing::warn!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_FORMAT
                ),
            }
        }

        if let Some(val) = env.non_empty(constants::ENV_PER_PAGE) {
            match val.trim().parse::<u32>() {
                Ok(n) => self.api.per_page = n,
                Err(_) => tracing::warn!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_PER_PAGE
                ),
            }
        }
    }

    /// Reject values the API cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.per_page == 0 || self.api.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid(format!(
                "api.per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.api.per_page
            )));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
