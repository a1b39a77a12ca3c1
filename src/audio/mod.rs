// Audio module - decoding raw bytes into an immutable mono analysis clip

pub mod clip;
pub mod decoder;
pub mod resample;
pub mod wav;

// Re-export commonly used types for convenience
pub use clip::AudioClip;
pub use decoder::{decode_bytes, decode_file};
pub use resample::{downmix_to_mono, resample_mono};
pub use wav::{write_wav, write_wav_to};
