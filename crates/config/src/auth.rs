//! GitHub token resolution.
//!
//! Creating a gist requires a token with the `gist` scope. It is looked up
//! with the following fallback chain:
//!
//! 1. `github_token` from the config (which includes `GIST_GITHUB_TOKEN`)
//! 2. The `GITHUB_TOKEN` environment variable
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (returns `None`)

use crate::error::{ConfigError, Result};

/// Environment variable consulted when the config carries no token.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Resolves the GitHub token.
///
/// Tries the following sources in order:
///
/// 1. `config_token`
/// 2. `GITHUB_TOKEN`, read through `lookup`
/// 3. `gh auth token` command
///
/// Blank values are skipped.
///
/// # Arguments
///
/// * `config_token` - The token from the configuration, if any
/// * `lookup` - Environment lookup, usually [`crate::env::process_env`]
///
/// # Returns
///
/// Returns `Some(token)` if a token is available, `None` otherwise. A
/// failing `gh` invocation is treated as "no token".
///
/// # Examples
///
/// ```no_run
/// use gist_config::auth::resolve_token;
/// use gist_config::env::process_env;
///
/// # async fn example() {
/// let token = resolve_token(Some("ghp_config"), process_env).await;
/// assert_eq!(token.as_deref(), Some("ghp_config"));
/// # }
/// ```
pub async fn resolve_token(
    config_token: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    // 1. Config token
    if let Some(token) = config_token.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    // 2. Environment
    if let Some(token) = lookup(GITHUB_TOKEN_VAR)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
    {
        return Some(token);
    }

    // 3. Try gh CLI
    get_gh_token().await.ok().flatten()
}

/// Gets a GitHub token from the `gh` CLI.
///
/// Runs `gh auth token` and returns the token if successful.
///
/// # Returns
///
/// - `Ok(Some(token))` if the command succeeds and returns a token
/// - `Ok(None)` if the `gh` command is not found or not logged in
/// - `Err(...)` if the command exists but fails
///
/// # Errors
///
/// Returns an error if:
/// - The `gh` command exists but cannot be executed
/// - The command exits with an unexpected error
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // gh not installed, not an error
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::GhAuthFailed(e));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        // If gh is not logged in, treat as no token available
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[tokio::test]
    async fn resolve_token_prefers_config_token() {
        let token = resolve_token(Some("config_token"), |name| {
            (name == GITHUB_TOKEN_VAR).then(|| "env_token".to_string())
        })
        .await;
        assert_eq!(token, Some("config_token".to_string()));
    }

    #[tokio::test]
    async fn resolve_token_falls_back_to_environment() {
        let token = resolve_token(None, |name| {
            (name == GITHUB_TOKEN_VAR).then(|| "env_token".to_string())
        })
        .await;
        assert_eq!(token, Some("env_token".to_string()));
    }

    #[tokio::test]
    async fn resolve_token_skips_blank_config_token() {
        let token = resolve_token(Some("   "), |name| {
            (name == GITHUB_TOKEN_VAR).then(|| "env_token".to_string())
        })
        .await;
        assert_eq!(token, Some("env_token".to_string()));
    }

    #[tokio::test]
    async fn resolve_token_trims_whitespace() {
        let token = resolve_token(Some(" ghp_xxx\n"), no_env).await;
        assert_eq!(token, Some("ghp_xxx".to_string()));
    }

    #[tokio::test]
    async fn resolve_token_gh_cli_fallback_does_not_panic() {
        // Without config or environment token, resolve_token will try gh CLI.
        // This verifies the fallback path doesn't panic regardless of
        // whether gh is installed or logged in on this machine.
        let _result = resolve_token(None, no_env).await;
    }
}
