//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the gist tool.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::{env_key, process_env};
use crate::error::{ConfigError, Result};
use crate::log::{LogConfig, LogFormat};
use crate::persistence::{find_config_file, read_config_file};

/// The GitHub endpoint that creates gists.
pub const DEFAULT_API_URL: &str = "https://api.github.com/gists";

/// The main configuration struct for the gist tool.
///
/// # Examples
///
/// ```
/// use gist_config::{Config, LogConfig};
///
/// let config = Config::default();
/// assert_eq!(config.api_url, "https://api.github.com/gists");
///
/// let config = Config {
///     log: LogConfig { level: "debug".to_string(), ..Default::default() },
///     github_token: Some("ghp_xxx".to_string()),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,

    /// GitHub token used to authenticate gist creation.
    ///
    /// If not set, the token is looked up in `GITHUB_TOKEN` and then
    /// requested from the `gh` CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Endpoint that gists are POSTed to.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            github_token: None,
            api_url: default_api_url(),
        }
    }
}

/// A configuration together with the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    /// The effective configuration, environment overrides applied.
    pub config: Config,
    /// The file the configuration was read from.
    pub path: PathBuf,
}

impl Config {
    /// Loads the configuration used by the command.
    ///
    /// The file is the explicit path if one is given, else `~/.gist.json`
    /// (or `~/.gist.json5`). `GIST_*` environment variables are then applied
    /// on top of the file's values.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file can be found, if it cannot
    /// be read or parsed, or if the resulting configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gist_config::Config;
    ///
    /// # fn example() -> gist_config::Result<()> {
    /// let loaded = Config::load(None)?;
    /// println!("Using config file: {}", loaded.path.display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let path = find_config_file(explicit)?;
        let mut config: Config = read_config_file(&path)?;
        config.apply_env_overrides(process_env);
        config.validate()?;
        Ok(LoadedConfig { config, path })
    }

    /// Loads configuration from a specific file, without environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configuration is invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces values with those found through `lookup`.
    ///
    /// `lookup` receives variable names such as `GIST_LOG_LEVEL` (see
    /// [`crate::env`]). Variables that are set always win over the file.
    ///
    /// # Examples
    ///
    /// ```
    /// use gist_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.apply_env_overrides(|name| {
    ///     (name == "GIST_LOG_LEVEL").then(|| "debug".to_string())
    /// });
    /// assert_eq!(config.log.level, "debug");
    /// ```
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup(&env_key("log.level")) {
            self.log.level = level;
        }
        if let Some(file) = lookup(&env_key("log.file")) {
            self.log.file = (!file.is_empty()).then(|| PathBuf::from(file));
        }
        if let Some(format) = lookup(&env_key("log.type")) {
            self.log.format = LogFormat::parse(&format);
        }
        if let Some(token) = lookup(&env_key("github_token")) {
            self.github_token = Some(token);
        }
        if let Some(url) = lookup(&env_key("api_url")) {
            self.api_url = url;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if `api_url` is not an
    /// `http://` or `https://` URL.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        Ok(())
    }

    /// Returns the configured token, treating an empty string as unset.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}
