// Decode error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Decode error code constants
///
/// Single source of truth for the numeric codes reported by the CLI and
/// carried in JSON error payloads.
///
/// Error code range: 1001-1006
pub struct DecodeErrorCodes {}

impl DecodeErrorCodes {
    /// Input could not be read
    pub const IO: i32 = 1001;

    /// Container or codec not recognized
    pub const UNSUPPORTED_FORMAT: i32 = 1002;

    /// Container has no decodable audio track
    pub const NO_TRACK: i32 = 1003;

    /// Codec failed while decoding packets
    pub const CODEC: i32 = 1004;

    /// Stream decoded to zero samples
    pub const EMPTY: i32 = 1005;

    /// Sample rate conversion failed
    pub const RESAMPLE: i32 = 1006;
}

/// Log a decode error with structured context
///
/// Fields: error_code, component, message, plus the caller-provided context
/// (usually the input name).
pub fn log_decode_error(err: &DecodeError, context: &str) {
    error!(
        "Decode error in {}: code={}, component=AudioDecoder, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while turning raw bytes into an `AudioClip`
///
/// None of these are ever coerced into a classification; the request is
/// rejected instead.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Reading the input failed
    Io { details: String },

    /// Probe could not identify the container, or no codec is registered
    UnsupportedFormat { details: String },

    /// Container has no default audio track
    NoTrack,

    /// Fatal codec error while decoding
    Codec { details: String },

    /// Stream ended without producing any samples
    Empty,

    /// Resampler construction or processing failed
    Resample { details: String },
}

impl ErrorCode for DecodeError {
    fn code(&self) -> i32 {
        match self {
            DecodeError::Io { .. } => DecodeErrorCodes::IO,
            DecodeError::UnsupportedFormat { .. } => DecodeErrorCodes::UNSUPPORTED_FORMAT,
            DecodeError::NoTrack => DecodeErrorCodes::NO_TRACK,
            DecodeError::Codec { .. } => DecodeErrorCodes::CODEC,
            DecodeError::Empty => DecodeErrorCodes::EMPTY,
            DecodeError::Resample { .. } => DecodeErrorCodes::RESAMPLE,
        }
    }

    fn message(&self) -> String {
        match self {
            DecodeError::Io { details } => format!("Failed to read audio input: {}", details),
            DecodeError::UnsupportedFormat { details } => {
                format!("Unsupported audio format: {}", details)
            }
            DecodeError::NoTrack => "No audio track found in input".to_string(),
            DecodeError::Codec { details } => format!("Audio codec error: {}", details),
            DecodeError::Empty => "Audio stream contained no samples".to_string(),
            DecodeError::Resample { details } => format!("Resampling failed: {}", details),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecodeError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for DecodeError {}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io {
            details: err.to_string(),
        }
    }
}

impl From<rubato::ResamplerConstructionError> for DecodeError {
    fn from(err: rubato::ResamplerConstructionError) -> Self {
        DecodeError::Resample {
            details: err.to_string(),
        }
    }
}

impl From<rubato::ResampleError> for DecodeError {
    fn from(err: rubato::ResampleError) -> Self {
        DecodeError::Resample {
            details: err.to_string(),
        }
    }
}
