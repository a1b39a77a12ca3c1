//! Configuration for decoding, feature extraction and classification
//!
//! Every tunable the detector uses lives here so a run is fully described by
//! one JSON document. The threshold set is versioned: changing any default
//! threshold or the quorum means bumping `THRESHOLD_SET_VERSION`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::Indicator;
use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "VOICE_ORIGIN_CONFIG";

/// Version of the built-in threshold set
pub const THRESHOLD_SET_VERSION: u32 = 1;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub features: FeatureConfig,
    pub thresholds: ThresholdSet,
}

/// Audio decoding and normalization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Analysis sample rate every clip is resampled to (Hz)
    pub target_sample_rate: u32,
    /// Clips longer than this are truncated; `None` keeps the whole stream
    pub max_duration_secs: Option<f32>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 16_000,
            max_duration_secs: Some(60.0),
        }
    }
}

/// Framed spectral/cepstral analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// STFT frame length in samples (Hann window of the same length)
    pub frame_size: usize,
    /// Distance between consecutive frame starts in samples
    pub hop_size: usize,
    /// Number of triangular mel bands
    pub n_mels: usize,
    /// Number of cepstral coefficients kept after the DCT
    pub n_mfcc: usize,
    /// Mean absolute amplitude below which a clip counts as silent
    pub silence_threshold: f32,
    /// Fraction of spectral energy defining the rolloff frequency
    pub rolloff_percent: f32,
    /// Lowest fundamental frequency the pitch tracker searches (Hz)
    pub pitch_fmin: f32,
    /// Highest fundamental frequency the pitch tracker searches (Hz)
    pub pitch_fmax: f32,
    /// YIN aperiodicity threshold; frames above it are unvoiced
    pub yin_threshold: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
            n_mels: 40,
            n_mfcc: 20,
            silence_threshold: 0.001,
            rolloff_percent: 0.85,
            pitch_fmin: 50.0,
            pitch_fmax: 500.0,
            yin_threshold: 0.1,
        }
    }
}

/// Versioned decision thresholds, one per indicator, plus the quorum
///
/// Every indicator fires when its descriptor is strictly below the
/// threshold. A value exactly at the threshold never fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSet {
    /// Reported with every verdict. Version 1 names the built-in values
    /// only; a tuned set must declare its own version.
    pub version: u32,
    /// Spectral flatness. Recordings carry a broadband noise floor from the
    /// room and microphone; vocoder output is far more tonal.
    pub tonal_flatness: f32,
    /// Spectral centroid (Hz). Synthetic speech is often band-limited and dark.
    pub dark_centroid_hz: f32,
    /// Mean per-coefficient MFCC variance (dB²). Low values mean the timbre
    /// barely moves over the clip.
    pub static_mfcc_variance: f32,
    /// Zero-crossing rate. Very smooth waveforms lack fricative noise.
    pub smooth_zcr: f32,
    /// 85% rolloff frequency (Hz). Energy confined to a narrow low band.
    pub narrow_rolloff_hz: f32,
    /// Standard deviation of frame RMS. Human speech has syllabic loudness
    /// swings; flat loudness suggests normalization by a generator.
    pub flat_rms_variability: f32,
    /// Standard deviation of voiced pitch (Hz). Natural prosody moves pitch.
    pub monotone_pitch_hz: f32,
    /// Fired indicators needed for AI_GENERATED
    pub quorum: usize,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            version: THRESHOLD_SET_VERSION,
            tonal_flatness: 0.05,
            dark_centroid_hz: 1800.0,
            static_mfcc_variance: 25.0,
            smooth_zcr: 0.08,
            narrow_rolloff_hz: 3500.0,
            flat_rms_variability: 0.01,
            monotone_pitch_hz: 10.0,
            quorum: 4,
        }
    }
}

impl ThresholdSet {
    /// Threshold associated with one indicator
    pub fn threshold(&self, indicator: Indicator) -> f32 {
        match indicator {
            Indicator::TonalSpectrum => self.tonal_flatness,
            Indicator::DarkSpectrum => self.dark_centroid_hz,
            Indicator::StaticTimbre => self.static_mfcc_variance,
            Indicator::SmoothWaveform => self.smooth_zcr,
            Indicator::NarrowBandwidth => self.narrow_rolloff_hz,
            Indicator::FlatDynamics => self.flat_rms_variability,
            Indicator::MonotonePitch => self.monotone_pitch_hz,
        }
    }

    /// Check every threshold is positive and finite, the quorum reachable
    /// and the version honest about the values it labels
    pub fn validate(&self) -> Result<(), ConfigError> {
        for indicator in Indicator::ALL {
            let value = self.threshold(indicator);
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: indicator.name(),
                    reason: format!("threshold must be positive and finite (got {})", value),
                });
            }
        }

        if self.quorum == 0 || self.quorum > Indicator::ALL.len() {
            return Err(ConfigError::Invalid {
                field: "quorum",
                reason: format!(
                    "must be between 1 and {} (got {})",
                    Indicator::ALL.len(),
                    self.quorum
                ),
            });
        }

        if self.version == 0 {
            return Err(ConfigError::Invalid {
                field: "version",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.version == THRESHOLD_SET_VERSION && self != &Self::default() {
            return Err(ConfigError::Invalid {
                field: "version",
                reason: format!(
                    "version {} is reserved for the built-in thresholds; give tuned thresholds another version",
                    THRESHOLD_SET_VERSION
                ),
            });
        }

        Ok(())
    }
}

impl FeatureConfig {
    /// Check frame geometry and filter bank parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_size < 64 {
            return Err(ConfigError::Invalid {
                field: "features.frame_size",
                reason: format!("must be at least 64 (got {})", self.frame_size),
            });
        }
        if self.hop_size == 0 || self.hop_size > self.frame_size {
            return Err(ConfigError::Invalid {
                field: "features.hop_size",
                reason: format!(
                    "must be in 1..={} (got {})",
                    self.frame_size, self.hop_size
                ),
            });
        }
        if self.n_mels == 0 || self.n_mfcc == 0 || self.n_mfcc > self.n_mels {
            return Err(ConfigError::Invalid {
                field: "features.n_mfcc",
                reason: format!(
                    "need 1 <= n_mfcc <= n_mels (got n_mfcc={}, n_mels={})",
                    self.n_mfcc, self.n_mels
                ),
            });
        }
        if !(self.rolloff_percent > 0.0 && self.rolloff_percent < 1.0) {
            return Err(ConfigError::Invalid {
                field: "features.rolloff_percent",
                reason: format!("must be in (0, 1) (got {})", self.rolloff_percent),
            });
        }
        if !(self.pitch_fmin > 0.0 && self.pitch_fmin < self.pitch_fmax) {
            return Err(ConfigError::Invalid {
                field: "features.pitch_fmin",
                reason: format!(
                    "need 0 < pitch_fmin < pitch_fmax (got {} / {})",
                    self.pitch_fmin, self.pitch_fmax
                ),
            });
        }
        if !(self.silence_threshold >= 0.0 && self.silence_threshold.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "features.silence_threshold",
                reason: format!("must be non-negative (got {})", self.silence_threshold),
            });
        }
        Ok(())
    }
}

impl AppConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decoder.target_sample_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "decoder.target_sample_rate",
                reason: "must be greater than 0".to_string(),
            });
        }
        if let Some(max) = self.decoder.max_duration_secs {
            if !(max > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "decoder.max_duration_secs",
                    reason: format!("must be positive when set (got {})", max),
                });
            }
        }
        self.features.validate()?;
        self.thresholds.validate()
    }

    /// Load configuration from a JSON file
    ///
    /// Missing sections and fields fall back to their defaults. Unlike
    /// [`AppConfig::load`], a missing or malformed file is an error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let display = path.as_ref().display().to_string();
        let contents = fs::read_to_string(&path).map_err(|err| ConfigError::Io {
            path: display.clone(),
            details: err.to_string(),
        })?;
        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
                path: display.clone(),
                details: err.to_string(),
            })?;
        config.validate()?;
        log::info!("[Config] Loaded configuration from {}", display);
        Ok(config)
    }

    /// Load configuration from `VOICE_ORIGIN_CONFIG`, or use defaults
    ///
    /// Any failure is logged and the defaults are returned.
    pub fn load() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("[Config] {}. Using defaults.", err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
