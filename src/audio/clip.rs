// AudioClip - immutable mono waveform handed to feature extraction

/// Decoded mono samples plus their sample rate
///
/// Fields are private so a clip cannot change after construction. The
/// extractor validates the sample rate, not the constructor, so synthetic
/// clips can be built freely in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip length in seconds (0.0 when the sample rate is zero)
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Mean absolute amplitude, the loudness measure used for silence gating
    pub fn mean_abs_amplitude(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| s.abs() as f64).sum();
        (sum / self.samples.len() as f64) as f32
    }
}
