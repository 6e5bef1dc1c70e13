//! Logging section of the configuration file.
//!
//! ```json
//! {
//!   "log": { "level": "debug", "file": "/tmp/gist.log", "type": "json" }
//! }
//! ```
//!
//! Only the shape of the section lives here. Turning it into a running
//! logger is the binary's job.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default minimum severity when the config file does not name one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format for log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines with full timestamps.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

impl LogFormat {
    /// Parses a format name. `"json"` (any case) selects [`LogFormat::Json`];
    /// every other value falls back to [`LogFormat::Text`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gist_config::LogFormat;
    ///
    /// assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    /// assert_eq!(LogFormat::parse("logfmt"), LogFormat::Text);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Returns the canonical name of this format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl Serialize for LogFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// The `log` section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum severity, e.g. `"info"` or `"debug"`.
    ///
    /// Kept as a string so that an unknown level is reported by the logger
    /// at startup rather than as a parse error of the whole file.
    #[serde(default = "default_level")]
    pub level: String,

    /// Append log records to this file instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Record format.
    #[serde(rename = "type", default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.file.is_none());
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn deserialize_full_section() {
        let json = r#"{"level": "debug", "file": "/var/log/gist.log", "type": "json"}"#;
        let config: LogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.file, Some(PathBuf::from("/var/log/gist.log")));
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn unknown_type_falls_back_to_text() {
        let config: LogConfig = serde_json::from_str(r#"{"type": "pretty"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn format_serializes_as_name() {
        let json = serde_json::to_string(&LogConfig {
            format: LogFormat::Json,
            ..Default::default()
        })
        .unwrap();
        assert!(json.contains(r#""type":"json""#));
        assert!(!json.contains("file"));
    }
}
