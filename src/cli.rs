//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;
use gist_github::DuplicatePolicy;

/// Upload code to https://gist.github.com
///
/// Reads the given files, bundles them into one public gist, and prints the
/// URL of the created gist.
#[derive(Debug, Parser)]
#[command(name = "gist", version)]
pub struct Cli {
    /// Config file (default is $HOME/.gist.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Files to upload (comma-separated, repeatable)
    #[arg(short, long, value_name = "PATHS", value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Gist description
    #[arg(short, long, default_value = "my gist")]
    pub desc: String,

    /// Fail when two files share a base name instead of keeping the last one
    #[arg(long)]
    pub reject_duplicates: bool,
}

impl Cli {
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        if self.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Overwrite
        }
    }
}
