// Indicator - the seven acoustic cues the classifier votes with
//
// Each indicator compares one FeatureVector field against its threshold in
// the active ThresholdSet. An indicator fires (votes AI_GENERATED) when the
// value is strictly below the threshold.
//
// The signed relative margin m = clamp((T - v) / T, -1, 1) measures how far
// the value sits past the threshold: positive on the AI side, negative or
// zero on the human side.

use serde::{Deserialize, Serialize};

use crate::analysis::features::FeatureVector;
use crate::config::ThresholdSet;

/// Acoustic cue compared against one threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Low spectral flatness: little broadband noise floor
    TonalSpectrum,
    /// Low spectral centroid
    DarkSpectrum,
    /// Low MFCC variance: the spectral envelope barely moves
    StaticTimbre,
    /// Low zero-crossing rate
    SmoothWaveform,
    /// Low 85% rolloff frequency
    NarrowBandwidth,
    /// Low frame RMS variability
    FlatDynamics,
    /// Low pitch variability over voiced frames
    MonotonePitch,
}

impl Indicator {
    /// Every indicator in table order (also the explanation tie-break order)
    pub const ALL: [Indicator; 7] = [
        Indicator::TonalSpectrum,
        Indicator::DarkSpectrum,
        Indicator::StaticTimbre,
        Indicator::SmoothWaveform,
        Indicator::NarrowBandwidth,
        Indicator::FlatDynamics,
        Indicator::MonotonePitch,
    ];

    /// Stable identifier used in reports and configuration errors
    pub fn name(&self) -> &'static str {
        match self {
            Indicator::TonalSpectrum => "tonal_spectrum",
            Indicator::DarkSpectrum => "dark_spectrum",
            Indicator::StaticTimbre => "static_timbre",
            Indicator::SmoothWaveform => "smooth_waveform",
            Indicator::NarrowBandwidth => "narrow_bandwidth",
            Indicator::FlatDynamics => "flat_dynamics",
            Indicator::MonotonePitch => "monotone_pitch",
        }
    }

    /// Descriptor this indicator reads
    ///
    /// `None` when the descriptor is not meaningful for the clip (pitch
    /// variability with fewer than two voiced frames).
    pub fn value(&self, features: &FeatureVector) -> Option<f32> {
        match self {
            Indicator::TonalSpectrum => Some(features.spectral_flatness),
            Indicator::DarkSpectrum => Some(features.spectral_centroid),
            Indicator::StaticTimbre => Some(features.mfcc_variance),
            Indicator::SmoothWaveform => Some(features.zero_crossing_rate),
            Indicator::NarrowBandwidth => Some(features.spectral_rolloff),
            Indicator::FlatDynamics => Some(features.rms_variability),
            Indicator::MonotonePitch => {
                if features.has_pitch_track() {
                    Some(features.pitch_variability)
                } else {
                    None
                }
            }
        }
    }

    /// Sentence used when this indicator dominates an AI_GENERATED verdict
    pub fn ai_explanation(&self) -> &'static str {
        match self {
            Indicator::TonalSpectrum => {
                "Spectrum is unusually tonal with almost no natural background noise floor"
            }
            Indicator::DarkSpectrum => {
                "Spectral energy is concentrated in low frequencies, consistent with band-limited synthetic speech"
            }
            Indicator::StaticTimbre => {
                "Vocal timbre stays nearly constant over the clip, suggesting generated speech"
            }
            Indicator::SmoothWaveform => {
                "Waveform is unusually smooth and lacks the fricative noise of natural speech"
            }
            Indicator::NarrowBandwidth => {
                "Energy is confined to a narrow frequency band, typical of vocoder output"
            }
            Indicator::FlatDynamics => {
                "Loudness is unnaturally even across the clip, suggesting normalized synthetic output"
            }
            Indicator::MonotonePitch => {
                "Unnatural pitch consistency and robotic speech patterns detected"
            }
        }
    }

    /// Sentence used when this indicator dominates a HUMAN verdict
    pub fn human_explanation(&self) -> &'static str {
        match self {
            Indicator::TonalSpectrum => {
                "Broadband noise floor of a natural recording environment observed"
            }
            Indicator::DarkSpectrum => {
                "Bright, full-range spectrum typical of a live microphone recording"
            }
            Indicator::StaticTimbre => {
                "Vocal timbre varies naturally from syllable to syllable"
            }
            Indicator::SmoothWaveform => {
                "Natural fricative and breath noise observed in the waveform"
            }
            Indicator::NarrowBandwidth => {
                "Energy spreads across a wide frequency range as in natural speech"
            }
            Indicator::FlatDynamics => {
                "Loudness rises and falls with natural syllabic rhythm"
            }
            Indicator::MonotonePitch => {
                "Natural prosody and human-like pitch variations observed"
            }
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One indicator evaluated against one FeatureVector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReading {
    pub indicator: Indicator,
    /// Descriptor value, `None` when not applicable
    pub value: Option<f32>,
    pub threshold: f32,
    /// `value < threshold`
    pub fired: bool,
    /// Signed relative margin in [-1, 1]; 0.0 when not applicable
    pub margin: f32,
}

impl IndicatorReading {
    pub fn evaluate(indicator: Indicator, features: &FeatureVector, thresholds: &ThresholdSet) -> Self {
        let threshold = thresholds.threshold(indicator);
        let value = indicator.value(features);

        let (fired, margin) = match value {
            Some(v) => (v < threshold, relative_margin(v, threshold)),
            None => (false, 0.0),
        };

        Self {
            indicator,
            value,
            threshold,
            fired,
            margin,
        }
    }
}

/// Signed relative distance below the threshold, clamped to [-1, 1]
fn relative_margin(value: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    ((threshold - value) / threshold).clamp(-1.0, 1.0)
}
