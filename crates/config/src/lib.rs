//! Configuration management for the gist tool.
//!
//! This crate handles discovering, loading, and validating configuration
//! from a file and the environment, and resolving the GitHub token.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`log`]: The `log` section (level, file, format)
//! - [`env`]: `GIST_*` environment variable overrides
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: Config file discovery and reading
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`GIST_*`, e.g. `GIST_LOG_LEVEL`)
//! 2. The file given with `--config`, else `~/.gist.json` (or `~/.gist.json5`)
//! 3. Built-in defaults for keys the file leaves out
//!
//! A config file must exist: loading fails when none is found.
//!
//! # Example File
//!
//! ```json5
//! {
//!   log: { level: "info", file: "/tmp/gist.log", type: "json" },
//!   github_token: "ghp_xxx",
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use gist_config::Config;
//!
//! # fn example() -> gist_config::Result<()> {
//! let loaded = Config::load(None)?;
//! println!("log level: {}", loaded.config.log.level);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod log;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use config::{Config, DEFAULT_API_URL, LoadedConfig};
pub use error::{ConfigError, Result};
pub use log::{LogConfig, LogFormat};
