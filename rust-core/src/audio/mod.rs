//! Audio container and WAV file I/O

pub mod clip;
pub mod wav;

pub use clip::AudioClip;
pub use wav::{read_wav, read_wav_bytes, write_wav};
