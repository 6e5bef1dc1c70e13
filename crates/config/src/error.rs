//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! discovery, loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// No configuration file exists at any of the searched locations.
    #[error("no config file found (searched: {})", format_paths(searched))]
    NotFound {
        /// Every path that was checked, in search order.
        searched: Vec<PathBuf>,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// The configured API URL is not an HTTP(S) URL.
    #[error("invalid api_url {0:?}: expected an http:// or https:// URL")]
    InvalidApiUrl(String),

    /// Failed to execute `gh auth token` command.
    #[error("failed to get GitHub token from gh CLI: {0}")]
    GhAuthFailed(#[source] std::io::Error),

    /// The `gh auth token` command returned an error.
    #[error("gh auth token failed with exit code {code:?}: {stderr}")]
    GhAuthError {
        /// The exit code, if available.
        code: Option<i32>,
        /// The stderr output.
        stderr: String,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
