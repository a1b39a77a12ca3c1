// Voice Origin - deterministic HUMAN / AI_GENERATED voice classification
// Decode → acoustic features → versioned heuristic vote

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use analysis::{
    Analysis, ClassificationResult, Classifier, FeatureExtractor, FeatureVector, Indicator,
    VoiceLabel, VoiceOriginDetector,
};
pub use audio::AudioClip;
pub use config::{AppConfig, DecoderConfig, FeatureConfig, ThresholdSet};
pub use error::{ConfigError, DecodeError, DetectionError, ErrorCode, FeatureError};
