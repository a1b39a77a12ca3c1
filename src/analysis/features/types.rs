// Types module - Data structures for clip-level acoustic descriptors
//
// Every field is a summary over all analysis frames of one clip. The vector
// is computed once per request and never mutated.

use serde::{Deserialize, Serialize};

/// Acoustic descriptors of one clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// Mean spectral flatness (0.0 to 1.0, geometric/arithmetic mean of the
    /// power spectrum)
    ///
    /// 0.0 = pure tone, 1.0 = white noise.
    pub spectral_flatness: f32,

    /// Mean spectral centroid in Hz (magnitude-weighted mean frequency)
    pub spectral_centroid: f32,

    /// Mean over cepstral coefficients of each coefficient's variance across
    /// frames (dB²)
    ///
    /// Measures how much the short-term spectral envelope moves over time.
    pub mfcc_variance: f32,

    /// Mean zero-crossing rate (0.0 to 1.0)
    pub zero_crossing_rate: f32,

    /// Mean frame RMS amplitude
    pub rms_energy: f32,

    /// Mean 85% energy rolloff frequency in Hz
    pub spectral_rolloff: f32,

    /// Standard deviation of frame RMS amplitude
    pub rms_variability: f32,

    /// Standard deviation of the fundamental frequency over voiced frames (Hz)
    ///
    /// 0.0 when fewer than two frames are voiced.
    pub pitch_variability: f32,

    /// Fraction of frames with a pitch estimate (0.0 to 1.0)
    pub voiced_ratio: f32,

    /// Number of analysis frames the summaries were taken over
    pub frame_count: usize,
}

impl FeatureVector {
    /// Number of frames with a pitch estimate
    pub fn voiced_frames(&self) -> usize {
        (self.frame_count as f32 * self.voiced_ratio).round() as usize
    }

    /// Whether enough frames were voiced for `pitch_variability` to mean anything
    pub fn has_pitch_track(&self) -> bool {
        self.voiced_frames() >= 2
    }
}
