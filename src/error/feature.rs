// Feature extraction error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Feature error code constants
///
/// Error code range: 2001-2003
pub struct FeatureErrorCodes {}

impl FeatureErrorCodes {
    /// Non-silent clip shorter than one analysis frame
    pub const CLIP_TOO_SHORT: i32 = 2001;

    /// Clip contains NaN or infinite samples
    pub const NON_FINITE_SAMPLE: i32 = 2002;

    /// Clip sample rate cannot support the configured analysis
    pub const INVALID_SAMPLE_RATE: i32 = 2003;
}

/// Log a feature extraction error with structured context
pub fn log_feature_error(err: &FeatureError, context: &str) {
    error!(
        "Feature error in {}: code={}, component=FeatureExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the acoustic feature extractor
///
/// Silence is absent: a silent clip is a normal outcome, not a
/// failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Clip has signal but fewer samples than one analysis frame
    ClipTooShort { samples: usize, required: usize },

    /// Sample at `index` is NaN or infinite
    NonFiniteSample { index: usize },

    /// Sample rate is zero or too low for the mel filter bank
    InvalidSampleRate { sample_rate: u32 },
}

impl ErrorCode for FeatureError {
    fn code(&self) -> i32 {
        match self {
            FeatureError::ClipTooShort { .. } => FeatureErrorCodes::CLIP_TOO_SHORT,
            FeatureError::NonFiniteSample { .. } => FeatureErrorCodes::NON_FINITE_SAMPLE,
            FeatureError::InvalidSampleRate { .. } => FeatureErrorCodes::INVALID_SAMPLE_RATE,
        }
    }

    fn message(&self) -> String {
        match self {
            FeatureError::ClipTooShort { samples, required } => format!(
                "Clip too short for analysis: need {} samples, got {}",
                required, samples
            ),
            FeatureError::NonFiniteSample { index } => {
                format!("Non-finite sample at index {}", index)
            }
            FeatureError::InvalidSampleRate { sample_rate } => {
                format!("Invalid sample rate for analysis: {} Hz", sample_rate)
            }
        }
    }
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeatureError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for FeatureError {}
