// Configuration error types and constants

use crate::error::ErrorCode;
use std::fmt;

/// Config error code constants
///
/// Error code range: 3001-3003
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Config file could not be read
    pub const IO: i32 = 3001;

    /// Config file is not valid JSON for `AppConfig`
    pub const PARSE: i32 = 3002;

    /// Threshold set or analysis parameters are out of range
    pub const INVALID: i32 = 3003;
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Reading the config file failed
    Io { path: String, details: String },

    /// JSON did not match the config schema
    Parse { path: String, details: String },

    /// A field failed validation
    Invalid { field: &'static str, reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::Io { .. } => ConfigErrorCodes::IO,
            ConfigError::Parse { .. } => ConfigErrorCodes::PARSE,
            ConfigError::Invalid { .. } => ConfigErrorCodes::INVALID,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::Io { path, details } => {
                format!("Failed to read config {}: {}", path, details)
            }
            ConfigError::Parse { path, details } => {
                format!("Failed to parse config {}: {}", path, details)
            }
            ConfigError::Invalid { field, reason } => {
                format!("Invalid config field {}: {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_codes() {
        let io = ConfigError::Io {
            path: "a.json".to_string(),
            details: "missing".to_string(),
        };
        assert_eq!(io.code(), ConfigErrorCodes::IO);

        let invalid = ConfigError::Invalid {
            field: "thresholds.quorum",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(invalid.code(), ConfigErrorCodes::INVALID);
        assert!(invalid.message().contains("thresholds.quorum"));
    }
}
