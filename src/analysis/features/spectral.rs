// Spectral module - Frequency-domain feature extraction
//
// This module computes per-frame spectral features from magnitude spectra.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Power floor for the flatness logarithm (about -100 dB)
const POWER_FLOOR: f32 = 1e-10;

/// Spectral feature computation functions
pub struct SpectralFeatures {
    sample_rate: u32,
    fft_size: usize,
    rolloff_percent: f32,
}

impl SpectralFeatures {
    /// Create a new spectral features processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `fft_size` - FFT window size
    /// * `rolloff_percent` - Energy fraction defining the rolloff (0.85 by default)
    pub fn new(sample_rate: u32, fft_size: usize, rolloff_percent: f32) -> Self {
        Self {
            sample_rate,
            fft_size,
            rolloff_percent,
        }
    }

    fn bin_width(&self) -> f32 {
        self.sample_rate as f32 / self.fft_size as f32
    }

    /// Compute spectral centroid (weighted mean frequency)
    ///
    /// Formula: centroid = Σ(f_i × |X[i]|) / Σ|X[i]|
    ///
    /// # Returns
    /// Spectral centroid in Hz, 0.0 for an all-zero spectrum
    pub fn compute_centroid(&self, spectrum: &[f32]) -> f32 {
        let freq_bin_width = self.bin_width();

        let weighted_sum: f32 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| i as f32 * freq_bin_width * mag)
            .sum();

        let magnitude_sum: f32 = spectrum.iter().sum();

        if magnitude_sum > 1e-10 {
            weighted_sum / magnitude_sum
        } else {
            0.0
        }
    }

    /// Compute spectral flatness (tonality measure) of the power spectrum
    ///
    /// Formula: flatness = geometric_mean(|X[i]|²) / arithmetic_mean(|X[i]|²)
    ///
    /// Power values are floored at `POWER_FLOOR` before the logarithm so a
    /// pure tone yields a value near 0.0 instead of being undefined. A frame
    /// whose power is entirely at the floor (digital silence) is perfectly
    /// flat and returns 1.0.
    ///
    /// # Returns
    /// Spectral flatness (0.0 to 1.0)
    pub fn compute_flatness(&self, spectrum: &[f32]) -> f32 {
        if spectrum.is_empty() {
            return 0.0;
        }

        let power: Vec<f64> = spectrum
            .iter()
            .map(|&mag| ((mag * mag).max(POWER_FLOOR)) as f64)
            .collect();

        if power.iter().all(|&p| p <= POWER_FLOOR as f64) {
            return 1.0;
        }

        let arithmetic_mean = power.iter().sum::<f64>() / power.len() as f64;

        // Geometric mean: exp(mean(log(x)))
        let log_mean = power.iter().map(|p| p.ln()).sum::<f64>() / power.len() as f64;
        let geometric_mean = log_mean.exp();

        ((geometric_mean / arithmetic_mean) as f32).clamp(0.0, 1.0)
    }

    /// Compute spectral rolloff
    ///
    /// Finds the frequency below which `rolloff_percent` of the spectral
    /// energy is contained.
    ///
    /// # Returns
    /// Rolloff frequency in Hz
    pub fn compute_rolloff(&self, spectrum: &[f32]) -> f32 {
        let total_energy: f32 = spectrum.iter().map(|&mag| mag * mag).sum();

        if total_energy < 1e-10 {
            return 0.0;
        }

        let threshold = self.rolloff_percent * total_energy;
        let freq_bin_width = self.bin_width();

        let mut cumulative_energy = 0.0;
        for (i, &mag) in spectrum.iter().enumerate() {
            cumulative_energy += mag * mag;
            if cumulative_energy >= threshold {
                return i as f32 * freq_bin_width;
            }
        }

        // Rounding left the sum short of the threshold; report Nyquist
        (spectrum.len() - 1) as f32 * freq_bin_width
    }
}
