// Decoder - container probing, packet decoding and normalization
//
// Turns arbitrary compressed or uncompressed audio (WAV, MP3, FLAC, Vorbis)
// into the mono clip at the analysis sample rate that feature extraction
// expects. Pipeline: probe -> decode packets -> interleaved f32 -> downmix ->
// resample -> truncate.

use std::fs::File;
use std::io::{Cursor, ErrorKind};
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use crate::audio::resample::{downmix_to_mono, resample_mono};
use crate::audio::AudioClip;
use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// Decode an in-memory audio payload
///
/// # Arguments
/// * `bytes` - Complete file contents
/// * `extension` - Optional container hint such as `"mp3"` or `"wav"`
/// * `config` - Target sample rate and duration window
pub fn decode_bytes(
    bytes: &[u8],
    extension: Option<&str>,
    config: &DecoderConfig,
) -> Result<AudioClip, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let source = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(source), Default::default());
    decode_stream(mss, extension, config)
}

/// Decode an audio file, using its extension as the probe hint
pub fn decode_file<P: AsRef<Path>>(path: P, config: &DecoderConfig) -> Result<AudioClip, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    decode_stream(mss, extension, config)
}

fn decode_stream(
    mss: MediaSourceStream,
    extension: Option<&str>,
    config: &DecoderConfig,
) -> Result<AudioClip, DecodeError> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| DecodeError::UnsupportedFormat {
            details: err.to_string(),
        })?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;

    let mut decoder = get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|err| DecodeError::UnsupportedFormat {
            details: err.to_string(),
        })?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track
        .codec_params
        .channels
        .map(|layout| layout.count())
        .unwrap_or(1);
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => {
                return Err(DecodeError::Codec {
                    details: err.to_string(),
                })
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count().max(1);

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buffer.samples());
            }
            // A corrupt packet is recoverable; the next one may decode fine
            Err(SymphoniaError::DecodeError(details)) => {
                skipped_packets += 1;
                tracing::warn!("[Decoder] Skipping corrupt packet: {}", details);
                continue;
            }
            Err(SymphoniaError::IoError(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => {
                return Err(DecodeError::Codec {
                    details: err.to_string(),
                })
            }
        }

        if let Some(max_secs) = config.max_duration_secs {
            let max_frames = (max_secs as f64 * sample_rate as f64).ceil() as usize;
            if interleaved.len() / channels >= max_frames {
                break;
            }
        }
    }

    if interleaved.is_empty() || sample_rate == 0 {
        return Err(DecodeError::Empty);
    }

    tracing::debug!(
        "[Decoder] Decoded {} frames at {} Hz, {} channel(s), {} corrupt packet(s) skipped",
        interleaved.len() / channels,
        sample_rate,
        channels,
        skipped_packets
    );

    let mono = downmix_to_mono(&interleaved, channels);
    drop(interleaved);

    let mut samples = resample_mono(&mono, sample_rate, config.target_sample_rate)?;

    if let Some(max_secs) = config.max_duration_secs {
        let max_len = (max_secs as f64 * config.target_sample_rate as f64).round() as usize;
        samples.truncate(max_len);
    }

    Ok(AudioClip::new(samples, config.target_sample_rate))
}
