//! Gist API client implementation.
//!
//! This module provides the [`GistClient`] struct, which submits a
//! [`GistRequest`] to the gist-creation endpoint in a single HTTP request.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::gist::{GistRequest, GistResponse};

/// The GitHub endpoint that creates gists.
pub const GIST_API_URL: &str = "https://api.github.com/gists";

/// Media type GitHub recommends for REST requests.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

const USER_AGENT: &str = concat!("gist/", env!("CARGO_PKG_VERSION"));

/// Client for the gist-creation endpoint, with optional authentication.
///
/// # Security
///
/// The token is stored as a [`SecretString`] so it never shows up in debug
/// output or logs.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use gist_github::{DuplicatePolicy, GistClient, GistRequest, client::GIST_API_URL};
///
/// # async fn example() -> gist_github::Result<()> {
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GistClient::new(GIST_API_URL, Some(token))?;
///
/// let gist = GistRequest::from_paths("my gist", ["notes.txt"], DuplicatePolicy::Overwrite)?;
/// let created = client.create(&gist).await?;
/// println!("{}", created.html_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GistClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<SecretString>,
}

impl GistClient {
    /// Creates a client that posts to `endpoint`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the gist-creation endpoint
    /// * `token` - Optional GitHub token sent as a bearer credential
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(authenticated = token.is_some()))]
    pub fn new(endpoint: impl Into<String>, token: Option<SecretString>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, endpoint, token))
    }

    /// Creates a client around an existing [`reqwest::Client`].
    ///
    /// Every request still carries the tool's `User-Agent`, which GitHub
    /// requires.
    #[must_use]
    pub fn with_http(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        token: Option<SecretString>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token,
        }
    }

    /// Returns whether requests carry a token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Creates a gist.
    ///
    /// Sends exactly one `POST` request. Only `201 Created` counts as
    /// success; its body is parsed into a [`GistResponse`].
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the request cannot be encoded or the success
    ///   body cannot be decoded
    /// - [`Error::Http`] for transport failures (DNS, refused connection,
    ///   timeout)
    /// - [`Error::UnexpectedStatus`] for any status other than 201; the
    ///   body is kept for diagnostics but not parsed
    #[instrument(skip(self, gist), fields(endpoint = %self.endpoint, files = gist.files.len()))]
    pub async fn create(&self, gist: &GistRequest) -> Result<GistResponse> {
        let body = gist.to_json()?;

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE))
            .header(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        debug!(bytes = body.len(), authenticated = self.is_authenticated(), "sending gist");
        let response = request.body(body).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        debug!(%status, bytes = bytes.len(), "received response");

        if status != StatusCode::CREATED {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(%status, "gist was not created");
            return Err(Error::UnexpectedStatus {
                status,
                headers,
                body,
            });
        }

        let created: GistResponse = serde_json::from_slice(&bytes)?;
        debug!(id = ?created.id, url = %created.html_url, "gist created");
        Ok(created)
    }
}
