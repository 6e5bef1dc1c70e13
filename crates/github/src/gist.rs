//! Gist request and response types.
//!
//! A [`GistRequest`] is built from local files with
//! [`GistRequest::from_paths`], serialized to the body GitHub expects:
//!
//! ```json
//! {
//!   "description": "my gist",
//!   "public": true,
//!   "files": { "main.rs": { "content": "fn main() {}" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Prefix of the names GitHub assigns to unnamed files.
const RESERVED_NAME_PREFIX: &str = "gistfile";

/// What to do when two input paths share a base name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later path replaces the earlier one.
    #[default]
    Overwrite,
    /// Building the request fails with [`Error::DuplicateFileName`].
    Reject,
}

/// One file of a gist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// The file name; also the key in [`GistRequest::files`].
    #[serde(skip)]
    pub name: String,
    /// The file content.
    pub content: String,
}

/// The body of a create-gist request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GistRequest {
    /// Free-form description shown above the files.
    pub description: String,
    /// Whether the gist is listed publicly.
    pub public: bool,
    /// Files keyed by name.
    pub files: BTreeMap<String, FileEntry>,
}

/// The fields of a created gist that the tool uses.
///
/// All other fields of the API response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GistResponse {
    /// Browser URL of the new gist.
    pub html_url: String,
    /// Gist identifier.
    #[serde(default)]
    pub id: Option<String>,
}

impl GistRequest {
    /// Builds a public gist from files on disk.
    ///
    /// Each file is keyed by its base name. Content is decoded as UTF-8,
    /// with invalid sequences replaced by U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns an error if `paths` is empty, if a path cannot be read, if a
    /// base name is missing or reserved, or if `policy` is
    /// [`DuplicatePolicy::Reject`] and two paths share a base name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gist_github::{DuplicatePolicy, GistRequest};
    ///
    /// # fn example() -> gist_github::Result<()> {
    /// let gist = GistRequest::from_paths("my gist", ["src/main.rs"], DuplicatePolicy::Overwrite)?;
    /// assert!(gist.files.contains_key("main.rs"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_paths<P: AsRef<Path>>(
        description: impl Into<String>,
        paths: impl IntoIterator<Item = P>,
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        let mut files: BTreeMap<String, FileEntry> = BTreeMap::new();
        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();

        for path in paths {
            let path = path.as_ref();
            let entry = read_entry(path)?;

            match sources.entry(entry.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(path.to_path_buf());
                }
                Entry::Occupied(mut slot) => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateFileName {
                            name: entry.name,
                            first: slot.get().clone(),
                            second: path.to_path_buf(),
                        });
                    }
                    DuplicatePolicy::Overwrite => {
                        warn!(
                            name = %entry.name,
                            replaced = %slot.get().display(),
                            by = %path.display(),
                            "duplicate file name, keeping the later file"
                        );
                        slot.insert(path.to_path_buf());
                    }
                },
            }
            files.insert(entry.name.clone(), entry);
        }

        if files.is_empty() {
            return Err(Error::NoFiles);
        }

        Ok(Self {
            description: description.into(),
            public: true,
            files,
        })
    }

    /// Serializes the request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn read_entry(path: &Path) -> Result<FileEntry> {
    let read_error = |source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    std::fs::metadata(path).map_err(read_error)?;
    let bytes = std::fs::read(path).map_err(read_error)?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))?
        .to_string();
    validate_file_name(&name)?;

    debug!(path = %path.display(), bytes = bytes.len(), "read gist file");
    Ok(FileEntry {
        name,
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Checks that `name` can be used as a gist file name.
///
/// # Errors
///
/// Returns [`Error::ReservedFileName`] for `gistfile` followed only by
/// digits, which GitHub uses for automatically named files.
///
/// # Examples
///
/// ```
/// use gist_github::gist::validate_file_name;
///
/// assert!(validate_file_name("gistfile1").is_err());
/// assert!(validate_file_name("gistfile.txt").is_ok());
/// ```
pub fn validate_file_name(name: &str) -> Result<()> {
    let reserved = name
        .strip_prefix(RESERVED_NAME_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
    if reserved {
        return Err(Error::ReservedFileName(name.to_string()));
    }
    Ok(())
}
