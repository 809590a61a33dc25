//! Error types for the fallible edges of the game (configuration I/O)
//!
//! The simulation itself never fails: exhausted pools and missing assets
//! degrade silently.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    Io { path: String, source: std::io::Error },
    /// The contents were not valid JSON for the expected shape
    Parse(serde_json::Error),
    /// A value parsed but is unusable
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot access {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid configuration: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid value for {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid() {
        let err = ConfigError::Invalid {
            field: "pools.bullet",
            reason: "must be greater than 0".into(),
        };
        assert_eq!(err.to_string(), "invalid value for pools.bullet: must be greater than 0");
    }

    #[test]
    fn test_parse_error_has_source() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
