//! Log severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a log entry, least to most severe.
///
/// The derived ordering is the filtering order: a sink with a minimum level
/// of `Warn` accepts `Warn` and `Error` entries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Verbose,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Stable lowercase name, as serialized into entries and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Level::Debug),
            "verbose" => Ok(Level::Verbose),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_severity() {
        assert!(Level::Debug < Level::Verbose);
        assert!(Level::Verbose < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Level::Warn).unwrap(), "\"warn\"");
        let level: Level = serde_json::from_str("\"verbose\"").unwrap();
        assert_eq!(level, Level::Verbose);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
        assert!("trace".parse::<Level>().is_err());
    }
}
