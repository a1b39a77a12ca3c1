// Temporal module - Time-domain feature extraction
//
// This module computes features directly from time-domain frames: zero
// crossings and loudness.

/// Compute zero-crossing rate (ZCR)
///
/// Formula: ZCR = crossings / (N - 1)
///
/// ZCR measures how often the signal changes sign. High ZCR indicates
/// high-frequency or noise-like content, low ZCR tonal low-frequency content.
///
/// # Returns
/// Zero-crossing rate (0.0 to 1.0)
pub fn compute_zcr(frame: &[f32]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }

    let crossings = frame
        .windows(2)
        .filter(|pair| (pair[1] >= 0.0) != (pair[0] >= 0.0))
        .count();

    crossings as f32 / (frame.len() - 1) as f32
}

/// Compute root-mean-square amplitude of a frame
pub fn compute_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let energy: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (energy / frame.len() as f64).sqrt() as f32
}

/// Mean and population standard deviation of a series
///
/// Returns (0.0, 0.0) for an empty series.
pub fn mean_and_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean as f32, variance.sqrt() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zcr_alternating_signal() {
        let frame = vec![1.0, -1.0, 1.0, -1.0, 1.0];
        assert_eq!(compute_zcr(&frame), 1.0);
    }

    #[test]
    fn test_zcr_constant_signal() {
        assert_eq!(compute_zcr(&[0.5; 100]), 0.0);
        assert_eq!(compute_zcr(&[0.0; 100]), 0.0);
        assert_eq!(compute_zcr(&[1.0]), 0.0);
    }

    #[test]
    fn test_zcr_low_frequency_sine() {
        let sample_rate = 16_000.0;
        let frame: Vec<f32> = (0..1600)
            .map(|i| (2.0 * std::f32::consts::PI * 100.0 * i as f32 / sample_rate).sin())
            .collect();

        // 100 Hz over 0.1 s crosses zero about 20 times
        let zcr = compute_zcr(&frame);
        assert!(zcr > 0.01 && zcr < 0.015, "Expected ZCR ~0.0125, got {}", zcr);
    }

    #[test]
    fn test_rms() {
        assert!((compute_rms(&[0.5, -0.5, 0.5, -0.5]) - 0.5).abs() < 1e-6);
        assert_eq!(compute_rms(&[]), 0.0);
    }

    #[test]
    fn test_mean_and_std() {
        let (mean, std) = mean_and_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-6);
        assert!((std - 2.0).abs() < 1e-6);
        assert_eq!(mean_and_std(&[]), (0.0, 0.0));
    }
}
