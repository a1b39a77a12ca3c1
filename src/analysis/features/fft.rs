// FFT module - Fast Fourier Transform computation
//
// This module handles FFT computation with proper windowing to reduce
// spectral leakage. The magnitude spectrum is used by spectral and cepstral
// feature extraction functions.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT processor that computes magnitude spectra from audio frames
///
/// The plan is built once and shared; `Arc<dyn Fft>` is `Send + Sync`, so one
/// processor can serve concurrent requests.
pub struct FftProcessor {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    /// Hann window for FFT (pre-computed)
    window: Vec<f32>,
}

impl FftProcessor {
    /// Create a new FFT processor
    ///
    /// # Arguments
    /// * `fft_size` - FFT window size (2048 by default for clip analysis)
    pub fn new(fft_size: usize) -> Self {
        // Pre-compute Hann window to reduce spectral leakage
        let window = (0..fft_size)
            .map(|i| {
                0.5 * (1.0
                    - ((2.0 * std::f32::consts::PI * i as f32) / (fft_size as f32 - 1.0)).cos())
            })
            .collect();

        let mut planner = FftPlanner::new();

        Self {
            fft: planner.plan_fft_forward(fft_size),
            fft_size,
            window,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of bins in a one-sided spectrum
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Compute magnitude spectrum using FFT
    ///
    /// Applies Hann windowing, performs FFT, and returns magnitude spectrum
    /// for positive frequencies only (exploiting symmetry of real-valued FFT).
    ///
    /// # Arguments
    /// * `frame` - Audio frame (length <= fft_size, zero padded if shorter)
    ///
    /// # Returns
    /// Magnitude spectrum (size = fft_size / 2 + 1)
    pub fn compute_magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .take(self.fft_size)
            .zip(self.window.iter())
            .map(|(&sample, &w)| Complex::new(sample * w, 0.0))
            .collect();

        // Pad with zeros if needed
        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer[..self.num_bins()].iter().map(|c| c.norm()).collect()
    }
}
