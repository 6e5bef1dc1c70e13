//! Configuration file discovery and reading.
//!
//! # File Formats
//!
//! Files are parsed with a JSON5 parser, so both plain JSON and JSON5
//! (comments, unquoted keys, trailing commas) are accepted.
//!
//! # File Locations
//!
//! The first match wins:
//!
//! 1. The path given with `--config`, used as-is
//! 2. `~/.gist.json`
//! 3. `~/.gist.json5`
//!
//! Finding nothing is an error: the tool refuses to run without a config file.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Config file names searched for in the home directory, in priority order.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".gist.json", ".gist.json5"];

/// Finds the configuration file to load.
///
/// # Arguments
///
/// * `explicit` - The path from `--config`, if one was given
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if no explicit path was given and
/// the home directory cannot be determined, or [`ConfigError::NotFound`] if
/// no config file exists there.
///
/// # Examples
///
/// ```no_run
/// use gist_config::persistence::find_config_file;
///
/// let path = find_config_file(None).unwrap();
/// println!("Using config at: {}", path.display());
/// ```
pub fn find_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    find_config_file_in(explicit, dirs::home_dir().as_deref())
}

/// Finds the configuration file, searching `home` instead of the real home
/// directory.
///
/// An explicit path is returned without checking that it exists; reading it
/// reports the failure with the path attached.
///
/// # Errors
///
/// See [`find_config_file`].
pub fn find_config_file_in(explicit: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let home = home.ok_or(ConfigError::NoHomeDirectory)?;
    let candidates: Vec<PathBuf> = HOME_CONFIG_FILE_NAMES
        .iter()
        .map(|name| home.join(name))
        .collect();

    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(ConfigError::NotFound {
            searched: candidates,
        }),
    }
}

/// Reads and parses a configuration file.
///
/// # Type Parameters
///
/// * `T` - The type to deserialize into (must implement `serde::Deserialize`)
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content cannot be parsed
///
/// # Examples
///
/// ```no_run
/// use gist_config::persistence::read_config_file;
/// use gist_config::Config;
///
/// # fn main() -> gist_config::Result<()> {
/// let config: Config = read_config_file("/home/me/.gist.json")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}
