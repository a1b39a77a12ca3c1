use super::*;

/// Feature vector well on the human side of every threshold
fn human_features() -> FeatureVector {
    FeatureVector {
        spectral_flatness: 0.25,
        spectral_centroid: 3200.0,
        mfcc_variance: 80.0,
        zero_crossing_rate: 0.15,
        rms_energy: 0.12,
        spectral_rolloff: 6000.0,
        rms_variability: 0.05,
        pitch_variability: 30.0,
        voiced_ratio: 0.7,
        frame_count: 90,
    }
}

/// Feature vector of a steady synthetic tone: every indicator fires
fn tone_features() -> FeatureVector {
    FeatureVector {
        spectral_flatness: 0.001,
        spectral_centroid: 225.0,
        mfcc_variance: 0.5,
        zero_crossing_rate: 0.027,
        rms_energy: 0.35,
        spectral_rolloff: 230.0,
        rms_variability: 0.0005,
        pitch_variability: 0.1,
        voiced_ratio: 1.0,
        frame_count: 90,
    }
}

fn create_classifier() -> Classifier {
    Classifier::new(ThresholdSet::default())
}

#[test]
fn test_silence() {
    let result = create_classifier().classify(None);
    assert_eq!(result.label, VoiceLabel::Silence);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.explanation, SILENCE_EXPLANATION);
    assert!(result.indicators.is_empty());
    assert_eq!(result.threshold_version, 1);
}

#[test]
fn test_tone_is_ai_generated() {
    let result = create_classifier().classify(Some(&tone_features()));
    assert_eq!(result.label, VoiceLabel::AiGenerated);
    assert_eq!(result.indicators, Indicator::ALL.to_vec());
    assert!(
        result.confidence > 0.9 && result.confidence <= 0.99,
        "confidence {}",
        result.confidence
    );
}

#[test]
fn test_natural_voice_is_human() {
    let result = create_classifier().classify(Some(&human_features()));
    assert_eq!(result.label, VoiceLabel::Human);
    assert!(result.indicators.is_empty());
    assert!((0.5..=0.99).contains(&result.confidence));
}

#[test]
fn test_quorum_boundary() {
    let classifier = create_classifier();

    // Three fired indicators stay HUMAN
    let three = FeatureVector {
        spectral_flatness: 0.01,
        spectral_centroid: 1000.0,
        mfcc_variance: 10.0,
        ..human_features()
    };
    let result = classifier.classify(Some(&three));
    assert_eq!(result.label, VoiceLabel::Human);
    assert_eq!(result.indicators.len(), 3);

    // A fourth tips the vote
    let four = FeatureVector {
        zero_crossing_rate: 0.05,
        ..three
    };
    let result = classifier.classify(Some(&four));
    assert_eq!(result.label, VoiceLabel::AiGenerated);
    assert_eq!(
        result.indicators,
        vec![
            Indicator::TonalSpectrum,
            Indicator::DarkSpectrum,
            Indicator::StaticTimbre,
            Indicator::SmoothWaveform
        ]
    );
}

#[test]
fn test_custom_quorum() {
    let thresholds = ThresholdSet {
        quorum: 1,
        ..ThresholdSet::default()
    };
    let features = FeatureVector {
        rms_variability: 0.001,
        ..human_features()
    };
    let result = Classifier::new(thresholds).classify(Some(&features));
    assert_eq!(result.label, VoiceLabel::AiGenerated);
    assert_eq!(result.indicators, vec![Indicator::FlatDynamics]);
}

#[test]
fn test_threshold_is_strict() {
    let classifier = create_classifier();
    let thresholds = ThresholdSet::default();

    let at_threshold = FeatureVector {
        spectral_flatness: thresholds.tonal_flatness,
        spectral_centroid: thresholds.dark_centroid_hz,
        mfcc_variance: thresholds.static_mfcc_variance,
        zero_crossing_rate: thresholds.smooth_zcr,
        spectral_rolloff: thresholds.narrow_rolloff_hz,
        rms_variability: thresholds.flat_rms_variability,
        pitch_variability: thresholds.monotone_pitch_hz,
        ..human_features()
    };
    let result = classifier.classify(Some(&at_threshold));
    assert_eq!(result.label, VoiceLabel::Human);
    assert!(
        result.indicators.is_empty(),
        "Values exactly at threshold must not fire, got {:?}",
        result.indicators
    );
    // No margin on either side
    assert_eq!(result.confidence, 0.5);
}

#[test]
fn test_unvoiced_clip_never_fires_pitch() {
    let features = FeatureVector {
        pitch_variability: 0.0,
        voiced_ratio: 0.01,
        ..tone_features()
    };
    let result = create_classifier().classify(Some(&features));
    assert!(!result.indicators.contains(&Indicator::MonotonePitch));
    assert_eq!(result.indicators.len(), 6);
    assert_eq!(result.label, VoiceLabel::AiGenerated);
}

#[test]
fn test_flatness_monotonicity() {
    let classifier = create_classifier();
    let base = FeatureVector {
        spectral_centroid: 1200.0,
        mfcc_variance: 15.0,
        zero_crossing_rate: 0.06,
        spectral_flatness: 0.049,
        ..human_features()
    };
    assert_eq!(classifier.classify(Some(&base)).label, VoiceLabel::AiGenerated);

    let mut previous = 0.0;
    for step in 0..=49 {
        let features = FeatureVector {
            spectral_flatness: 0.049 - step as f32 * 0.001,
            ..base
        };
        let result = classifier.classify(Some(&features));
        assert_eq!(result.label, VoiceLabel::AiGenerated);
        assert!(
            result.confidence >= previous,
            "Confidence dropped from {} to {} at flatness {}",
            previous,
            result.confidence,
            features.spectral_flatness
        );
        previous = result.confidence;
    }
}

#[test]
fn test_human_confidence_grows_with_margin() {
    let classifier = create_classifier();
    let near = FeatureVector {
        spectral_flatness: 0.06,
        spectral_centroid: 2000.0,
        mfcc_variance: 28.0,
        zero_crossing_rate: 0.09,
        spectral_rolloff: 3800.0,
        rms_variability: 0.011,
        pitch_variability: 11.0,
        ..human_features()
    };
    let near_result = classifier.classify(Some(&near));
    let far_result = classifier.classify(Some(&human_features()));

    assert_eq!(near_result.label, VoiceLabel::Human);
    assert_eq!(far_result.label, VoiceLabel::Human);
    assert!(far_result.confidence > near_result.confidence);
}

#[test]
fn test_confidence_has_two_decimals() {
    let result = create_classifier().classify(Some(&human_features()));
    let scaled = result.confidence * 100.0;
    assert!((scaled - scaled.round()).abs() < 1e-3, "{}", result.confidence);
}

#[test]
fn test_explanation_follows_dominant_indicator() {
    let classifier = create_classifier();

    // Flat dynamics is the strongest AI cue
    let features = FeatureVector {
        spectral_flatness: 0.045,
        spectral_centroid: 1700.0,
        mfcc_variance: 24.0,
        rms_variability: 0.0001,
        ..human_features()
    };
    let result = classifier.classify(Some(&features));
    assert_eq!(result.label, VoiceLabel::AiGenerated);
    assert_eq!(result.explanation, Indicator::FlatDynamics.ai_explanation());

    // Human verdict: every margin saturates at -1, the first indicator wins
    let features = FeatureVector {
        spectral_flatness: 0.5,
        spectral_centroid: 4000.0,
        mfcc_variance: 100.0,
        zero_crossing_rate: 0.2,
        spectral_rolloff: 7500.0,
        rms_variability: 0.1,
        pitch_variability: 40.0,
        ..human_features()
    };
    let result = classifier.classify(Some(&features));
    assert_eq!(result.label, VoiceLabel::Human);
    assert_eq!(result.explanation, Indicator::TonalSpectrum.human_explanation());
    assert_eq!(result.confidence, 0.99);
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = create_classifier();
    let features = human_features();
    let first = classifier.classify(Some(&features));
    for _ in 0..10 {
        assert_eq!(classifier.classify(Some(&features)), first);
    }
}

#[test]
fn test_result_serialization() {
    let result = create_classifier().classify(Some(&tone_features()));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["label"], "AI_GENERATED");
    assert_eq!(json["thresholdVersion"], 1);
    assert_eq!(json["indicators"][0], "tonal_spectrum");
    assert!(json["confidence"].is_number());
}

#[test]
fn test_label_strings() {
    assert_eq!(VoiceLabel::Human.to_string(), "HUMAN");
    assert_eq!(VoiceLabel::AiGenerated.to_string(), "AI_GENERATED");
    assert_eq!(
        serde_json::to_string(&VoiceLabel::Silence).unwrap(),
        "\"SILENCE\""
    );
}
