// WAV export of analysis clips
//
// Lets a user listen to exactly what the extractor saw after downmix,
// resampling and truncation.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::AudioClip;

/// Write a clip as 16-bit PCM mono to any seekable writer
pub fn write_wav_to<W: Write + Seek>(writer: W, clip: &AudioClip) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(writer, spec)?;
    for &sample in clip.samples() {
        let scaled = (sample * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        writer.write_sample(scaled)?;
    }
    writer.finalize()
}

/// Write a clip as 16-bit PCM mono WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, clip: &AudioClip) -> Result<(), hound::Error> {
    let file = File::create(path)?;
    write_wav_to(BufWriter::new(file), clip)
}
