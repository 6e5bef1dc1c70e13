//! Logger construction from the `log` config section.
//!
//! The logger is an explicit value rather than process-wide state: [`Logger::set_default`]
//! scopes it to the current thread for as long as the returned guard lives.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use gist_config::{LogConfig, LogFormat};
use tracing::dispatcher::{self, DefaultGuard};
use tracing::{Dispatch, Level, Span};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Errors raised while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The configured level is not a known severity.
    #[error("not a valid log level: {0:?}")]
    InvalidLevel(String),

    /// The log file could not be opened for appending.
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The current OS user could not be determined.
    #[error("failed to determine current user: {0}")]
    User(#[source] std::io::Error),

    /// The hostname could not be determined.
    #[error("failed to determine hostname: {0}")]
    Hostname(#[source] std::io::Error),
}

/// Parses a severity name, ignoring case.
///
/// `fatal` and `panic` are accepted as aliases for `error`, and `warning`
/// for `warn`.
pub fn parse_level(level: &str) -> Result<LevelFilter, LogError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "fatal" | "panic" => Ok(LevelFilter::ERROR),
        _ => Err(LogError::InvalidLevel(level.to_string())),
    }
}

/// Who is running the tool, attached to records at debug level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub hostname: String,
}

impl Identity {
    pub fn current() -> Result<Self, LogError> {
        Ok(Self {
            user: whoami::fallible::username().map_err(LogError::User)?,
            hostname: whoami::fallible::hostname().map_err(LogError::Hostname)?,
        })
    }
}

/// A configured logger, not yet installed anywhere.
pub struct Logger {
    dispatch: Dispatch,
    level: LevelFilter,
    identity: Identity,
    file: Option<PathBuf>,
}

impl Logger {
    /// Builds a logger for the current user and host.
    pub fn init(config: &LogConfig) -> Result<Self, LogError> {
        Self::with_identity(config, Identity::current()?)
    }

    /// Builds a logger with a known identity.
    pub fn with_identity(config: &LogConfig, identity: Identity) -> Result<Self, LogError> {
        let level = parse_level(&config.level)?;

        let (writer, ansi) = match &config.file {
            Some(path) => {
                let file = open_append(path)?;
                (BoxMakeWriter::new(Mutex::new(file)), false)
            }
            None => (BoxMakeWriter::new(std::io::stderr), true),
        };

        let registry = tracing_subscriber::registry().with(level);
        let dispatch = match config.format {
            LogFormat::Json => Dispatch::new(
                registry.with(tracing_subscriber::fmt::layer().json().with_writer(writer)),
            ),
            LogFormat::Text => Dispatch::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(ansi)
                        .with_writer(writer),
                ),
            ),
        };

        Ok(Self {
            dispatch,
            level,
            identity,
            file: config.file.clone(),
        })
    }

    /// Makes this logger the default for the current thread until the guard
    /// is dropped.
    #[must_use = "the logger is uninstalled when the guard is dropped"]
    pub fn set_default(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// Returns the span every record of the run is nested in.
    ///
    /// At debug level and finer it carries `hostname` and `user`; otherwise
    /// it is disabled and adds nothing.
    pub fn root_span(&self) -> Span {
        if self.level < Level::DEBUG {
            return Span::none();
        }
        dispatcher::with_default(&self.dispatch, || {
            tracing::info_span!(
                "gist",
                hostname = %self.identity.hostname,
                user = %self.identity.user,
            )
        })
    }

    /// Returns the file records are appended to, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

fn open_append(path: &Path) -> Result<File, LogError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o660);
    }
    options.open(path).map_err(|source| LogError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}
