// Classifier - heuristic voice-origin decision rule
//
// This module turns a FeatureVector into a HUMAN / AI_GENERATED verdict by
// majority vote over the seven indicators, and a missing FeatureVector into
// SILENCE.
//
// Decision rule:
//   score = number of fired indicators
//   AI_GENERATED if score >= quorum (default 4 of 7), else HUMAN
//
// Confidence:
//   evidence   = Σ|m| over indicators agreeing with the label / 7
//   confidence = 0.5 + 0.49 × evidence, rounded to two decimals
// Non-silent confidence lies in [0.5, 0.99]. Pushing an agreeing descriptor
// further past its threshold never lowers it.
//
// Explanation: the sentence of the agreeing indicator with the largest |m|,
// ties resolved in Indicator::ALL order.

use serde::{Deserialize, Serialize};

use crate::analysis::features::FeatureVector;
use crate::analysis::indicator::{Indicator, IndicatorReading};
use crate::config::ThresholdSet;

/// Explanation reported for silent or empty clips
pub const SILENCE_EXPLANATION: &str = "No audible voice detected - audio is silent or empty";

/// Base confidence of any non-silent verdict
const CONFIDENCE_FLOOR: f32 = 0.5;
/// Confidence gained at full evidence (caps non-silent confidence at 0.99)
const CONFIDENCE_SPAN: f32 = 0.49;

/// Verdict on the origin of the voice in a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceLabel {
    /// Natural human speech
    Human,
    /// Synthesized or converted speech
    AiGenerated,
    /// No audible signal; features were not extracted
    Silence,
}

impl VoiceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceLabel::Human => "HUMAN",
            VoiceLabel::AiGenerated => "AI_GENERATED",
            VoiceLabel::Silence => "SILENCE",
        }
    }
}

impl std::fmt::Display for VoiceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus the audit trail that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: VoiceLabel,
    /// 0.5 to 0.99 for HUMAN / AI_GENERATED, exactly 1.0 for SILENCE
    pub confidence: f32,
    pub explanation: String,
    /// Indicators that fired, in table order
    pub indicators: Vec<Indicator>,
    /// Version of the ThresholdSet the verdict was computed with
    pub threshold_version: u32,
}

/// Classifier applies the versioned ThresholdSet to feature vectors
///
/// Holds only the immutable threshold set, so one instance can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    thresholds: ThresholdSet,
}

impl Classifier {
    /// Create a classifier over a validated threshold set
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    /// Classify extracted features, or report SILENCE when there are none
    pub fn classify(&self, features: Option<&FeatureVector>) -> ClassificationResult {
        match features {
            Some(features) => self.classify_features(features),
            None => ClassificationResult {
                label: VoiceLabel::Silence,
                confidence: 1.0,
                explanation: SILENCE_EXPLANATION.to_string(),
                indicators: Vec::new(),
                threshold_version: self.thresholds.version,
            },
        }
    }

    /// Evaluate every indicator against `features`, in table order
    pub fn evaluate(&self, features: &FeatureVector) -> Vec<IndicatorReading> {
        Indicator::ALL
            .iter()
            .map(|&indicator| IndicatorReading::evaluate(indicator, features, &self.thresholds))
            .collect()
    }

    /// Apply the majority-vote rule to a FeatureVector
    pub fn classify_features(&self, features: &FeatureVector) -> ClassificationResult {
        let readings = self.evaluate(features);

        let fired: Vec<Indicator> = readings
            .iter()
            .filter(|reading| reading.fired)
            .map(|reading| reading.indicator)
            .collect();

        let label = if fired.len() >= self.thresholds.quorum {
            VoiceLabel::AiGenerated
        } else {
            VoiceLabel::Human
        };

        let is_ai = label == VoiceLabel::AiGenerated;
        let agreeing: Vec<&IndicatorReading> = readings
            .iter()
            .filter(|reading| reading.fired == is_ai)
            .collect();

        let evidence =
            agreeing.iter().map(|reading| reading.margin.abs()).sum::<f32>() / readings.len() as f32;
        let confidence = round_confidence(CONFIDENCE_FLOOR + CONFIDENCE_SPAN * evidence);

        // Strictly greater keeps the earliest indicator on ties
        let mut dominant: Option<&IndicatorReading> = None;
        for &reading in &agreeing {
            if dominant.map_or(true, |best| reading.margin.abs() > best.margin.abs()) {
                dominant = Some(reading);
            }
        }

        let explanation = match (dominant, is_ai) {
            (Some(reading), true) => reading.indicator.ai_explanation(),
            (Some(reading), false) => reading.indicator.human_explanation(),
            // Unreachable with a validated quorum; fall back to the pitch sentence
            (None, true) => Indicator::MonotonePitch.ai_explanation(),
            (None, false) => Indicator::MonotonePitch.human_explanation(),
        };

        tracing::debug!(
            "[Classifier] {} ({} of {} fired: {:?}) confidence={:.2}",
            label,
            fired.len(),
            readings.len(),
            fired,
            confidence
        );

        ClassificationResult {
            label,
            confidence,
            explanation: explanation.to_string(),
            indicators: fired,
            threshold_version: self.thresholds.version,
        }
    }
}

/// Round to two decimals and keep inside [0, 1]
fn round_confidence(value: f32) -> f32 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
