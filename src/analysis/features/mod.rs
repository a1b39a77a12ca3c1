// FeatureExtractor - clip-level acoustic descriptors for voice-origin analysis
//
// This module turns an AudioClip into a FeatureVector by framed analysis over
// the whole clip and averaging per-frame measurements.
//
// Module organization:
// - types: Data structures (FeatureVector)
// - fft: FFT computation with windowing
// - spectral: Frequency-domain features (centroid, flatness, rolloff)
// - cepstral: Mel filter bank and MFCCs
// - temporal: Time-domain features (ZCR, RMS) and summary statistics
// - pitch: YIN fundamental frequency tracker
// - mod.rs: Coordinator (FeatureExtractor)
//
// Framing is fixed by FeatureConfig (default 2048-sample Hann frames, hop
// 512). Only frames lying fully inside the clip are analysed; there is no
// centre padding, so a given clip always yields the same frames.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

mod cepstral;
mod fft;
mod pitch;
mod spectral;
mod temporal;
mod types;

pub use types::FeatureVector;

use cepstral::MfccProcessor;
use fft::FftProcessor;
use pitch::YinTracker;
use spectral::SpectralFeatures;
use temporal::{compute_rms, compute_zcr, mean_and_std};

use crate::audio::AudioClip;
use crate::config::FeatureConfig;
use crate::error::FeatureError;

/// FeatureExtractor coordinates the DSP feature extraction pipeline
///
/// Holds only immutable state (configuration, FFT plan and window) and is
/// `Send + Sync`. Rate-dependent helpers (mel filter bank, pitch tracker)
/// are built per clip from the clip's own sample rate.
pub struct FeatureExtractor {
    config: FeatureConfig,
    fft_processor: FftProcessor,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// The configuration is expected to have passed `FeatureConfig::validate`.
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            fft_processor: FftProcessor::new(config.frame_size),
            config,
        }
    }

    /// Extract the clip's FeatureVector
    ///
    /// # Returns
    /// * `Ok(Some(features))` - descriptors of a clip with signal
    /// * `Ok(None)` - the clip is empty or its mean absolute amplitude is
    ///   below the silence threshold; extraction was skipped whatever the
    ///   sample rate
    /// * `Err(FeatureError)` - the clip cannot be analysed
    pub fn extract(&self, clip: &AudioClip) -> Result<Option<FeatureVector>, FeatureError> {
        if clip.is_empty() {
            return Ok(None);
        }

        if let Some(index) = clip.samples().iter().position(|s| !s.is_finite()) {
            return Err(FeatureError::NonFiniteSample { index });
        }

        let level = clip.mean_abs_amplitude();
        if level < self.config.silence_threshold {
            tracing::debug!(
                "[FeatureExtractor] Silent clip: mean |x| = {:.6} < {}",
                level,
                self.config.silence_threshold
            );
            return Ok(None);
        }

        // After the silence gate: a silent clip is SILENCE at any rate
        let sample_rate = clip.sample_rate();
        if sample_rate == 0 || sample_rate as f32 <= 2.0 * self.config.pitch_fmax {
            return Err(FeatureError::InvalidSampleRate { sample_rate });
        }

        let frame_size = self.fft_processor.fft_size();
        if clip.len() < frame_size {
            return Err(FeatureError::ClipTooShort {
                samples: clip.len(),
                required: frame_size,
            });
        }

        Ok(Some(self.analyse_frames(clip)))
    }

    fn analyse_frames(&self, clip: &AudioClip) -> FeatureVector {
        let config = &self.config;
        let sample_rate = clip.sample_rate();
        let samples = clip.samples();

        let spectral = SpectralFeatures::new(sample_rate, config.frame_size, config.rolloff_percent);
        let mfcc = MfccProcessor::new(config.n_mels, config.n_mfcc, config.frame_size, sample_rate);
        let yin = YinTracker::new(
            sample_rate,
            config.frame_size,
            config.pitch_fmin,
            config.pitch_fmax,
            config.yin_threshold,
        );

        let frame_count = 1 + (samples.len() - config.frame_size) / config.hop_size;

        let mut flatness = Vec::with_capacity(frame_count);
        let mut centroid = Vec::with_capacity(frame_count);
        let mut rolloff = Vec::with_capacity(frame_count);
        let mut zcr = Vec::with_capacity(frame_count);
        let mut rms = Vec::with_capacity(frame_count);
        let mut mel_frames = Vec::with_capacity(frame_count);
        let mut pitches = Vec::new();

        for index in 0..frame_count {
            let start = index * config.hop_size;
            let frame = &samples[start..start + config.frame_size];

            let spectrum = self.fft_processor.compute_magnitude_spectrum(frame);
            flatness.push(spectral.compute_flatness(&spectrum));
            centroid.push(spectral.compute_centroid(&spectrum));
            rolloff.push(spectral.compute_rolloff(&spectrum));
            mel_frames.push(mfcc.mel_db(&spectrum));

            zcr.push(compute_zcr(frame));
            rms.push(compute_rms(frame));

            if let Some(f0) = yin.estimate(frame) {
                pitches.push(f0);
            }
        }

        let coefficients = mfcc.coefficients(&mel_frames);
        let (rms_energy, rms_variability) = mean_and_std(&rms);
        let pitch_variability = if pitches.len() >= 2 {
            mean_and_std(&pitches).1
        } else {
            0.0
        };

        let features = FeatureVector {
            spectral_flatness: mean_and_std(&flatness).0,
            spectral_centroid: mean_and_std(&centroid).0,
            mfcc_variance: mfcc.coefficient_variance(&coefficients),
            zero_crossing_rate: mean_and_std(&zcr).0,
            rms_energy,
            spectral_rolloff: mean_and_std(&rolloff).0,
            rms_variability,
            pitch_variability,
            voiced_ratio: pitches.len() as f32 / frame_count as f32,
            frame_count,
        };

        tracing::debug!("[FeatureExtractor] {} frames: {:?}", frame_count, features);
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SAMPLE_RATE: u32 = 16_000;

    /// Generate pure sine wave for testing
    fn generate_sine_wave(frequency: f32, amplitude: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    /// Generate reproducible white noise for testing
    fn generate_white_noise(amplitude: f32, len: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len)
            .map(|_| amplitude * rng.gen_range(-1.0..1.0))
            .collect()
    }

    fn extract(samples: Vec<f32>) -> Result<Option<FeatureVector>, FeatureError> {
        FeatureExtractor::new(FeatureConfig::default()).extract(&AudioClip::new(samples, SAMPLE_RATE))
    }

    #[test]
    fn test_sine_features() {
        let features = extract(generate_sine_wave(220.0, 0.5, SAMPLE_RATE as usize))
            .unwrap()
            .expect("sine is not silent");

        assert!(features.spectral_flatness < 0.01, "{:?}", features);
        assert!(
            features.spectral_centroid > 150.0 && features.spectral_centroid < 400.0,
            "{:?}",
            features
        );
        assert!(features.zero_crossing_rate < 0.04, "{:?}", features);
        assert!(features.spectral_rolloff < 500.0, "{:?}", features);
        assert!(features.mfcc_variance < 1.0, "{:?}", features);
        assert!(features.rms_variability < 0.005, "{:?}", features);
        assert!((features.rms_energy - 0.3536).abs() < 0.01, "{:?}", features);
        assert!(features.voiced_ratio > 0.9, "{:?}", features);
        assert!(features.pitch_variability < 1.0, "{:?}", features);
    }

    #[test]
    fn test_noise_features() {
        let features = extract(generate_white_noise(0.5, SAMPLE_RATE as usize, 1))
            .unwrap()
            .expect("noise is not silent");

        assert!(features.spectral_flatness > 0.4, "{:?}", features);
        assert!(features.spectral_centroid > 3000.0, "{:?}", features);
        assert!(features.zero_crossing_rate > 0.3, "{:?}", features);
        assert!(features.spectral_rolloff > 5000.0, "{:?}", features);
        assert!(features.voiced_ratio < 0.1, "{:?}", features);
    }

    #[test]
    fn test_centroid_tracks_frequency() {
        let low = extract(generate_sine_wave(200.0, 0.5, 8192)).unwrap().unwrap();
        let high = extract(generate_sine_wave(3000.0, 0.5, 8192)).unwrap().unwrap();
        assert!(high.spectral_centroid > low.spectral_centroid);
        assert!(high.spectral_rolloff > low.spectral_rolloff);
    }

    #[test]
    fn test_frame_count() {
        let features = extract(generate_sine_wave(220.0, 0.5, 2048 + 512 * 10 + 100))
            .unwrap()
            .unwrap();
        assert_eq!(features.frame_count, 11);
    }

    #[test]
    fn test_features_in_valid_ranges() {
        let mut signal = generate_sine_wave(440.0, 0.3, SAMPLE_RATE as usize);
        for (s, n) in signal
            .iter_mut()
            .zip(generate_white_noise(0.05, SAMPLE_RATE as usize, 9))
        {
            *s += n;
        }
        let features = extract(signal).unwrap().unwrap();

        assert!((0.0..=1.0).contains(&features.spectral_flatness));
        assert!((0.0..=8000.0).contains(&features.spectral_centroid));
        assert!((0.0..=1.0).contains(&features.zero_crossing_rate));
        assert!((0.0..=8000.0).contains(&features.spectral_rolloff));
        assert!((0.0..=1.0).contains(&features.voiced_ratio));
        assert!(features.mfcc_variance >= 0.0);
        assert!(features.rms_energy >= 0.0);
        assert!(features.rms_variability >= 0.0);
        assert!(features.pitch_variability >= 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let signal = generate_white_noise(0.3, 20_000, 3);
        let first = extract(signal.clone()).unwrap();
        let second = extract(signal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_clip_is_silence() {
        assert_eq!(extract(Vec::new()), Ok(None));
    }

    #[test]
    fn test_zero_clip_is_silence() {
        for len in [1, 100, 2048, 48_000] {
            assert_eq!(extract(vec![0.0; len]), Ok(None), "length {}", len);
        }
    }

    #[test]
    fn test_quiet_clip_is_silence() {
        assert_eq!(extract(generate_white_noise(0.0015, 16_000, 5)), Ok(None));
    }

    #[test]
    fn test_short_clip_is_error() {
        assert_eq!(
            extract(generate_sine_wave(220.0, 0.5, 1000)),
            Err(FeatureError::ClipTooShort {
                samples: 1000,
                required: 2048
            })
        );
    }

    #[test]
    fn test_non_finite_sample_is_error() {
        let mut signal = generate_sine_wave(220.0, 0.5, 4096);
        signal[17] = f32::NAN;
        assert_eq!(
            extract(signal),
            Err(FeatureError::NonFiniteSample { index: 17 })
        );
    }

    #[test]
    fn test_trailing_digital_silence_keeps_noise_flat() {
        let noise = generate_white_noise(0.3, 24_000, 21);
        let mut padded = noise.clone();
        padded.extend(std::iter::repeat(0.0).take(24_000));

        let plain = extract(noise).unwrap().unwrap();
        let padded = extract(padded).unwrap().unwrap();
        assert!(
            padded.spectral_flatness >= plain.spectral_flatness,
            "padding lowered flatness: {} -> {}",
            plain.spectral_flatness,
            padded.spectral_flatness
        );
    }

    #[test]
    fn test_silence_wins_over_sample_rate() {
        let extractor = FeatureExtractor::new(FeatureConfig::default());
        for sample_rate in [0, 500, 1000] {
            let clip = AudioClip::new(vec![0.0; 4096], sample_rate);
            assert_eq!(extractor.extract(&clip), Ok(None), "{} Hz", sample_rate);
        }
        assert_eq!(extractor.extract(&AudioClip::new(Vec::new(), 0)), Ok(None));
    }

    #[test]
    fn test_invalid_sample_rate() {
        let extractor = FeatureExtractor::new(FeatureConfig::default());
        let clip = AudioClip::new(generate_sine_wave(220.0, 0.5, 4096), 0);
        assert_eq!(
            extractor.extract(&clip),
            Err(FeatureError::InvalidSampleRate { sample_rate: 0 })
        );

        let clip = AudioClip::new(generate_sine_wave(220.0, 0.5, 4096), 1000);
        assert_eq!(
            extractor.extract(&clip),
            Err(FeatureError::InvalidSampleRate { sample_rate: 1000 })
        );
    }
}
