// Analysis module - decode → extract → classify pipeline
//
// This module orchestrates one voice-origin request: an AudioClip (decoded
// here or supplied by the caller) goes through the FeatureExtractor and the
// Classifier, producing an Analysis.
//
// Architecture:
// - VoiceOriginDetector: immutable façade owning configuration, extractor
//   and classifier; shareable across threads
// - Pipeline: decoder → FeatureExtractor → Classifier
// - Output: Analysis (ClassificationResult + optional FeatureVector)

use std::path::Path;

use serde::Serialize;

use crate::audio::{decode_bytes, decode_file, AudioClip};
use crate::config::AppConfig;
use crate::error::{log_decode_error, log_feature_error, ConfigError, DetectionError};

pub mod classifier;
pub mod features;
pub mod indicator;

pub use classifier::{ClassificationResult, Classifier, VoiceLabel, SILENCE_EXPLANATION};
pub use features::{FeatureExtractor, FeatureVector};
pub use indicator::{Indicator, IndicatorReading};

/// Outcome of one detection request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub result: ClassificationResult,
    /// `None` when the clip was silent and extraction was skipped
    pub features: Option<FeatureVector>,
    /// Length of the analysed clip in seconds
    pub duration_secs: f32,
}

/// VoiceOriginDetector runs the full detection pipeline
///
/// Holds no per-request state; `&self` methods can be called concurrently.
pub struct VoiceOriginDetector {
    config: AppConfig,
    extractor: FeatureExtractor,
    classifier: Classifier,
}

impl VoiceOriginDetector {
    /// Create a detector from a configuration
    ///
    /// # Errors
    /// `ConfigError::Invalid` when any section fails validation.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        tracing::info!(
            "[VoiceOriginDetector] thresholds v{} (quorum {}), {} Hz analysis rate",
            config.thresholds.version,
            config.thresholds.quorum,
            config.decoder.target_sample_rate
        );

        Ok(Self {
            extractor: FeatureExtractor::new(config.features.clone()),
            classifier: Classifier::new(config.thresholds.clone()),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Extract features of an already decoded clip
    ///
    /// The clip is analysed at its own sample rate.
    pub fn extract_features(&self, clip: &AudioClip) -> Result<Option<FeatureVector>, DetectionError> {
        self.extractor.extract(clip).map_err(|err| {
            log_feature_error(&err, "VoiceOriginDetector::extract_features");
            DetectionError::from(err)
        })
    }

    /// Classify an already decoded clip
    pub fn analyze_clip(&self, clip: &AudioClip) -> Result<Analysis, DetectionError> {
        let features = self.extract_features(clip)?;
        let result = self.classifier.classify(features.as_ref());

        tracing::info!(
            "[VoiceOriginDetector] {} (confidence {:.2}) over {:.2}s",
            result.label,
            result.confidence,
            clip.duration_secs()
        );

        Ok(Analysis {
            result,
            features,
            duration_secs: clip.duration_secs(),
        })
    }

    /// Decode and classify an in-memory payload
    ///
    /// # Arguments
    /// * `bytes` - Complete encoded audio (MP3, WAV, ...)
    /// * `extension_hint` - Optional container hint such as `"mp3"`
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        extension_hint: Option<&str>,
    ) -> Result<Analysis, DetectionError> {
        let clip = decode_bytes(bytes, extension_hint, &self.config.decoder).map_err(|err| {
            log_decode_error(&err, "VoiceOriginDetector::analyze_bytes");
            err
        })?;
        self.analyze_clip(&clip)
    }

    /// Decode and classify an audio file
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis, DetectionError> {
        let path = path.as_ref();
        let clip = decode_file(path, &self.config.decoder).map_err(|err| {
            log_decode_error(&err, &path.display().to_string());
            err
        })?;
        self.analyze_clip(&clip)
    }
}
