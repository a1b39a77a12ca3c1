// Resample module - channel downmix and sample rate conversion
//
// Every clip is analysed at one fixed rate so thresholds expressed in Hz and
// frame sizes in samples mean the same thing for every input.

use rubato::{FftFixedIn, Resampler};

use crate::error::DecodeError;

/// Input frames per rubato processing block
const CHUNK_SIZE: usize = 1024;

/// Sub-chunks used by the FFT resampler (trades latency for quality)
const SUB_CHUNKS: usize = 2;

/// Average interleaved frames down to a single channel
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().copied().sum::<f32>() / channels as f32)
        .collect()
}

/// Convert a mono signal from `from_rate` to `to_rate`
///
/// Output length is `round(len * to_rate / from_rate)`. The resampler's
/// group delay is trimmed so output sample `i` lines up with input time
/// `i / to_rate`.
pub fn resample_mono(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, DecodeError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(DecodeError::Resample {
            details: format!("invalid rate conversion {} -> {}", from_rate, to_rate),
        });
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        1,
    )?;

    let expected = ((samples.len() as u64 * to_rate as u64 + from_rate as u64 / 2)
        / from_rate as u64) as usize;
    let delay = resampler.output_delay();
    let mut output: Vec<f32> = Vec::with_capacity(expected + delay + CHUNK_SIZE);

    let mut position = 0;
    while samples.len() - position >= resampler.input_frames_next() {
        let needed = resampler.input_frames_next();
        let chunk: [&[f32]; 1] = [&samples[position..position + needed]];
        let block = resampler.process(&chunk[..], None)?;
        output.extend_from_slice(&block[0]);
        position += needed;
    }

    if position < samples.len() {
        let tail: [&[f32]; 1] = [&samples[position..]];
        let block = resampler.process_partial(Some(&tail[..]), None)?;
        output.extend_from_slice(&block[0]);
    }

    // Flush the delay line
    while output.len() < expected + delay {
        let block = resampler.process_partial(None::<&[&[f32]]>, None)?;
        if block[0].is_empty() {
            break;
        }
        output.extend_from_slice(&block[0]);
    }

    let end = (delay + expected).min(output.len());
    let start = delay.min(end);
    Ok(output[start..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(sample_rate: u32, frequency: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_downmix_stereo() {
        let interleaved = vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix_to_mono(&interleaved, 2), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix_to_mono(&samples, 1), samples);
    }

    #[test]
    fn test_same_rate_is_identity() {
        let samples = sine(16_000, 440.0, 1000);
        assert_eq!(resample_mono(&samples, 16_000, 16_000).unwrap(), samples);
    }

    #[test]
    fn test_downsample_length() {
        let samples = sine(48_000, 440.0, 48_000);
        let out = resample_mono(&samples, 48_000, 16_000).unwrap();
        assert_eq!(out.len(), 16_000);
    }

    #[test]
    fn test_upsample_length_rounds() {
        let samples = sine(8_000, 200.0, 8_001);
        let out = resample_mono(&samples, 8_000, 16_000).unwrap();
        assert_eq!(out.len(), 16_002);
    }

    #[test]
    fn test_downsample_preserves_tone_level() {
        let samples = sine(44_100, 440.0, 44_100);
        let out = resample_mono(&samples, 44_100, 16_000).unwrap();

        // Ignore edges where the filter ramps in and out
        let middle = &out[2000..14000];
        let rms = (middle.iter().map(|s| s * s).sum::<f32>() / middle.len() as f32).sqrt();
        assert!(
            (rms - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.05,
            "Expected RMS near 0.707, got {}",
            rms
        );
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            resample_mono(&[0.0; 10], 0, 16_000),
            Err(DecodeError::Resample { .. })
        ));
    }
}
