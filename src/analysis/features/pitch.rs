// Pitch module - YIN fundamental frequency estimation
//
// Per frame: difference function, cumulative mean normalized difference,
// absolute threshold, local minimum search and parabolic refinement. Frames
// where no lag dips below the threshold are reported as unvoiced.
//
// Reference:
// - de Cheveigné, A. & Kawahara, H. (2002). YIN, a fundamental frequency
//   estimator for speech and music

/// YIN pitch tracker for fixed-size frames
pub struct YinTracker {
    sample_rate: u32,
    /// Integration window (half the frame)
    window: usize,
    min_lag: usize,
    max_lag: usize,
    threshold: f32,
}

impl YinTracker {
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `frame_size` - Frame length the tracker will receive
    /// * `fmin` / `fmax` - Search range in Hz
    /// * `threshold` - Aperiodicity threshold (0.1 is the published default)
    pub fn new(sample_rate: u32, frame_size: usize, fmin: f32, fmax: f32, threshold: f32) -> Self {
        let window = frame_size / 2;
        let max_lag = ((sample_rate as f32 / fmin).ceil() as usize).min(window.saturating_sub(1));
        let min_lag = ((sample_rate as f32 / fmax).floor() as usize).clamp(2, max_lag.max(2));

        Self {
            sample_rate,
            window,
            min_lag,
            max_lag,
            threshold,
        }
    }

    /// Estimate the fundamental frequency of one frame
    ///
    /// # Returns
    /// `Some(hz)` for a voiced frame, `None` when the frame is aperiodic, too
    /// short or silent.
    pub fn estimate(&self, frame: &[f32]) -> Option<f32> {
        if self.min_lag >= self.max_lag || frame.len() < self.window + self.max_lag {
            return None;
        }

        let cmnd = self.normalized_difference(frame)?;

        let mut lag = (self.min_lag..=self.max_lag).find(|&tau| cmnd[tau] < self.threshold)?;
        while lag < self.max_lag && cmnd[lag + 1] < cmnd[lag] {
            lag += 1;
        }

        let refined = self.refine(&cmnd, lag);
        if refined <= 0.0 {
            return None;
        }
        Some(self.sample_rate as f32 / refined)
    }

    /// Cumulative mean normalized difference for lags 0..=max_lag
    fn normalized_difference(&self, frame: &[f32]) -> Option<Vec<f32>> {
        let mut diff = vec![0.0f64; self.max_lag + 1];
        for (tau, slot) in diff.iter_mut().enumerate().skip(1) {
            *slot = frame[..self.window]
                .iter()
                .zip(&frame[tau..tau + self.window])
                .map(|(&a, &b)| {
                    let d = (a - b) as f64;
                    d * d
                })
                .sum();
        }

        let mut cmnd = vec![1.0f32; self.max_lag + 1];
        let mut running = 0.0f64;
        for tau in 1..=self.max_lag {
            running += diff[tau];
            cmnd[tau] = if running > 1e-12 {
                (diff[tau] * tau as f64 / running) as f32
            } else {
                1.0
            };
        }

        // A silent frame has a flat difference function
        if running <= 1e-12 {
            return None;
        }
        Some(cmnd)
    }

    /// Parabolic interpolation around `lag`
    fn refine(&self, cmnd: &[f32], lag: usize) -> f32 {
        if lag == 0 || lag + 1 >= cmnd.len() {
            return lag as f32;
        }
        let (left, center, right) = (cmnd[lag - 1], cmnd[lag], cmnd[lag + 1]);
        let denominator = left - 2.0 * center + right;
        if denominator.abs() < 1e-12 {
            return lag as f32;
        }
        let offset = 0.5 * (left - right) / denominator;
        lag as f32 + offset.clamp(-1.0, 1.0)
    }
}
