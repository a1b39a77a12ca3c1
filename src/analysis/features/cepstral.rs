// Cepstral module - mel filter bank and MFCC computation
//
// MFCCs summarize the short-term spectral envelope. Per frame:
//   power spectrum -> triangular mel bands -> 10·log10 -> DCT-II (orthonormal)
// Band levels are clipped to TOP_DB below the loudest band of the whole clip
// before the DCT so that near-silent bands do not dominate the variance with
// floating point noise.
//
// References:
// - Davis, S. & Mermelstein, P. (1980). Comparison of parametric
//   representations for monosyllabic word recognition
// - Young, S. et al. The HTK Book (mel scale definition)

use super::temporal::mean_and_std;

/// Dynamic range kept below the loudest mel band (dB)
pub const TOP_DB: f32 = 80.0;

/// Power floor before the logarithm
const MEL_POWER_FLOOR: f32 = 1e-10;

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular filters evenly spaced on the mel scale from 0 Hz to Nyquist
pub struct MelFilterBank {
    /// n_mels rows of n_bins weights
    filters: Vec<Vec<f32>>,
}

impl MelFilterBank {
    pub fn new(n_mels: usize, fft_size: usize, sample_rate: u32) -> Self {
        let n_bins = fft_size / 2 + 1;
        let bin_width = sample_rate as f32 / fft_size as f32;
        let mel_max = hz_to_mel(sample_rate as f32 / 2.0);

        let edges: Vec<f32> = (0..n_mels + 2)
            .map(|i| mel_to_hz(mel_max * i as f32 / (n_mels + 1) as f32))
            .collect();

        let filters = (0..n_mels)
            .map(|m| {
                let (lower, center, upper) = (edges[m], edges[m + 1], edges[m + 2]);
                (0..n_bins)
                    .map(|k| {
                        let freq = k as f32 * bin_width;
                        if freq > lower && freq < center {
                            (freq - lower) / (center - lower)
                        } else if freq >= center && freq < upper {
                            (upper - freq) / (upper - center)
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();

        Self { filters }
    }

    pub fn num_bands(&self) -> usize {
        self.filters.len()
    }

    /// Band energies of one power spectrum
    pub fn apply(&self, power: &[f32]) -> Vec<f32> {
        self.filters
            .iter()
            .map(|weights| weights.iter().zip(power).map(|(w, p)| w * p).sum())
            .collect()
    }
}

/// MFCC computation over a sequence of frames
pub struct MfccProcessor {
    filter_bank: MelFilterBank,
    /// n_mfcc rows of n_mels orthonormal DCT-II basis values
    dct: Vec<Vec<f32>>,
}

impl MfccProcessor {
    /// # Arguments
    /// * `n_mels` - Number of mel bands
    /// * `n_mfcc` - Number of coefficients kept (must not exceed `n_mels`)
    /// * `fft_size` - FFT size the magnitude spectra come from
    /// * `sample_rate` - Clip sample rate in Hz
    pub fn new(n_mels: usize, n_mfcc: usize, fft_size: usize, sample_rate: u32) -> Self {
        let n = n_mels as f32;
        let dct = (0..n_mfcc)
            .map(|k| {
                let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
                (0..n_mels)
                    .map(|i| {
                        scale
                            * (std::f32::consts::PI * k as f32 * (2.0 * i as f32 + 1.0)
                                / (2.0 * n))
                                .cos()
                    })
                    .collect()
            })
            .collect();

        Self {
            filter_bank: MelFilterBank::new(n_mels, fft_size, sample_rate),
            dct,
        }
    }

    /// Log mel band levels (dB) of one magnitude spectrum
    pub fn mel_db(&self, magnitude: &[f32]) -> Vec<f32> {
        let power: Vec<f32> = magnitude.iter().map(|&m| m * m).collect();
        self.filter_bank
            .apply(&power)
            .into_iter()
            .map(|energy| 10.0 * energy.max(MEL_POWER_FLOOR).log10())
            .collect()
    }

    /// Turn per-frame mel levels into cepstral coefficients
    ///
    /// Applies the clip-wide `TOP_DB` clip before the DCT.
    pub fn coefficients(&self, mel_frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
        let peak = mel_frames
            .iter()
            .flat_map(|frame| frame.iter().copied())
            .fold(f32::NEG_INFINITY, f32::max);
        let floor = peak - TOP_DB;

        mel_frames
            .iter()
            .map(|frame| {
                let clipped: Vec<f32> = frame.iter().map(|&db| db.max(floor)).collect();
                self.dct
                    .iter()
                    .map(|basis| basis.iter().zip(&clipped).map(|(b, x)| b * x).sum())
                    .collect()
            })
            .collect()
    }

    /// Mean over coefficients of each coefficient's variance across frames
    ///
    /// A single frame has no temporal variance and yields 0.0.
    pub fn coefficient_variance(&self, coefficients: &[Vec<f32>]) -> f32 {
        if coefficients.len() < 2 || self.dct.is_empty() {
            return 0.0;
        }

        let total: f32 = (0..self.dct.len())
            .map(|k| {
                let track: Vec<f32> = coefficients.iter().map(|frame| frame[k]).collect();
                let (_, std) = mean_and_std(&track);
                std * std
            })
            .sum();

        total / self.dct.len() as f32
    }
}
