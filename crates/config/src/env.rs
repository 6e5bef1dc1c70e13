//! Environment variable overrides.
//!
//! Every configuration key can be overridden by an environment variable
//! named after it: the key path is upper-cased, dots become underscores, and
//! the result is prefixed with `GIST_`.
//!
//! | Key           | Variable            |
//! |---------------|---------------------|
//! | `log.level`   | `GIST_LOG_LEVEL`    |
//! | `log.file`    | `GIST_LOG_FILE`     |
//! | `log.type`    | `GIST_LOG_TYPE`     |
//! | `github_token`| `GIST_GITHUB_TOKEN` |
//! | `api_url`     | `GIST_API_URL`      |
//!
//! Lookups go through a caller-supplied function so that tests never need
//! to mutate the process environment.

/// Prefix shared by every override variable.
pub const ENV_PREFIX: &str = "GIST";

/// Configuration keys that can be overridden, as dotted paths.
pub const OVERRIDABLE_KEYS: &[&str] = &[
    "log.level",
    "log.file",
    "log.type",
    "github_token",
    "api_url",
];

/// Returns the environment variable name for a dotted key path.
///
/// # Examples
///
/// ```
/// use gist_config::env::env_key;
///
/// assert_eq!(env_key("log.level"), "GIST_LOG_LEVEL");
/// assert_eq!(env_key("api_url"), "GIST_API_URL");
/// ```
#[must_use]
pub fn env_key(key_path: &str) -> String {
    format!("{ENV_PREFIX}_{}", key_path.replace('.', "_").to_uppercase())
}

/// Looks up a variable in the process environment.
///
/// Unset and non-UTF-8 variables are both reported as `None`.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
