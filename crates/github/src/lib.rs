//! GitHub Gist client for the gist tool.
//!
//! This crate turns local files into a gist and submits it to the GitHub
//! API.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`GistRequest`] and [`FileEntry`]: The create-gist request body, built
//!   from files on disk
//! - [`DuplicatePolicy`]: What to do when two files share a base name
//! - [`GistClient`]: Submits the request and returns a [`GistResponse`]
//! - [`Error`]: Error types for gist operations
//!
//! # Authentication
//!
//! Creating a gist requires a token with the `gist` scope. Without one the
//! request is still sent, and GitHub's refusal is reported as
//! [`Error::UnexpectedStatus`].
//!
//! Tokens are handled using [`secrecy::SecretString`] to prevent accidental
//! logging of credentials.
//!
//! # Examples
//!
//! ```no_run
//! use gist_github::{DuplicatePolicy, GistClient, GistRequest, client::GIST_API_URL};
//!
//! # async fn example() -> gist_github::Result<()> {
//! let gist = GistRequest::from_paths(
//!     "build logs",
//!     ["build.log", "test.log"],
//!     DuplicatePolicy::Reject,
//! )?;
//!
//! let client = GistClient::new(GIST_API_URL, None)?;
//! let created = client.create(&gist).await?;
//! println!("access it using url: {}", created.html_url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod gist;

pub use client::GistClient;
pub use error::{Error, Result};
pub use gist::{DuplicatePolicy, FileEntry, GistRequest, GistResponse};
