// Error types for the voice-origin detector
//
// This module defines custom error types for decoding, feature extraction and
// configuration, each with stable numeric codes suitable for JSON reports.

mod config;
mod decode;
mod feature;

pub use config::{ConfigError, ConfigErrorCodes};
pub use decode::{log_decode_error, DecodeError, DecodeErrorCodes};
pub use feature::{log_feature_error, FeatureError, FeatureErrorCodes};

use std::fmt;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error payloads in the CLI.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Any failure of a single detection request
///
/// Silence is not represented here; it is a classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    Decode(DecodeError),
    Feature(FeatureError),
    Config(ConfigError),
}

impl ErrorCode for DetectionError {
    fn code(&self) -> i32 {
        match self {
            DetectionError::Decode(err) => err.code(),
            DetectionError::Feature(err) => err.code(),
            DetectionError::Config(err) => err.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            DetectionError::Decode(err) => err.message(),
            DetectionError::Feature(err) => err.message(),
            DetectionError::Config(err) => err.message(),
        }
    }
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Decode(err) => err.fmt(f),
            DetectionError::Feature(err) => err.fmt(f),
            DetectionError::Config(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DetectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectionError::Decode(err) => Some(err),
            DetectionError::Feature(err) => Some(err),
            DetectionError::Config(err) => Some(err),
        }
    }
}

impl From<DecodeError> for DetectionError {
    fn from(err: DecodeError) -> Self {
        DetectionError::Decode(err)
    }
}

impl From<FeatureError> for DetectionError {
    fn from(err: FeatureError) -> Self {
        DetectionError::Feature(err)
    }
}

impl From<ConfigError> for DetectionError {
    fn from(err: ConfigError) -> Self {
        DetectionError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_error_forwards_codes() {
        let err: DetectionError = DecodeError::Empty.into();
        assert_eq!(err.code(), DecodeErrorCodes::EMPTY);

        let err: DetectionError = FeatureError::NonFiniteSample { index: 0 }.into();
        assert_eq!(err.code(), FeatureErrorCodes::NON_FINITE_SAMPLE);
        assert!(err.to_string().contains("FeatureError"));
    }

    #[test]
    fn test_error_code_trait_objects() {
        let decode: &dyn ErrorCode = &DecodeError::NoTrack;
        assert_eq!(decode.code(), 1003);

        let feature: &dyn ErrorCode = &FeatureError::InvalidSampleRate { sample_rate: 0 };
        assert_eq!(feature.code(), 2003);
    }

    #[test]
    fn test_error_propagation() {
        fn may_fail() -> Result<(), DecodeError> {
            Err(DecodeError::NoTrack)
        }

        fn caller() -> Result<(), DetectionError> {
            may_fail()?;
            Ok(())
        }

        assert_eq!(
            caller().unwrap_err(),
            DetectionError::Decode(DecodeError::NoTrack)
        );
    }
}
