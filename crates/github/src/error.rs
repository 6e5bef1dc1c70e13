//! Error types for gist operations.
//!
//! This module defines the error types that can occur while building a gist
//! from local files and while submitting it to the GitHub API.

use std::path::PathBuf;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Errors that can occur while building or creating a gist.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No input files were supplied.
    #[error("no files to upload")]
    NoFiles,

    /// An input file could not be inspected or read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input path has no base name to use as the gist file name.
    #[error("cannot derive a file name from {0}")]
    InvalidFileName(PathBuf),

    /// The file name collides with the API's automatic naming scheme.
    ///
    /// GitHub names unnamed files `gistfile1`, `gistfile2`, and so on.
    #[error("file name {0:?} is reserved by GitHub (gistfile<N>)")]
    ReservedFileName(String),

    /// Two input paths share a base name.
    #[error("duplicate file name {name:?} ({first} and {second})")]
    DuplicateFileName {
        /// The shared base name.
        name: String,
        /// The path that claimed the name first.
        first: PathBuf,
        /// The path that collided with it.
        second: PathBuf,
    },

    /// The request or the response could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP exchange failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with something other than `201 Created`.
    #[error("{status}: {headers:?}")]
    UnexpectedStatus {
        /// The response status.
        status: StatusCode,
        /// The response headers.
        headers: HeaderMap,
        /// The response body, for diagnostics.
        body: String,
    },
}

impl Error {
    /// Returns the `message` field of a GitHub error body, if there is one.
    #[must_use]
    pub fn api_message(&self) -> Option<String> {
        let Self::UnexpectedStatus { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("message")?.as_str().map(str::to_string)
    }
}

/// A specialized Result type for gist operations.
pub type Result<T> = std::result::Result<T, Error>;
