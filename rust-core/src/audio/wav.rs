//! WAV reading and writing with hound
//!
//! Integer PCM is scaled into [-1.0, 1.0]; output is always 32-bit float so the
//! embedded coefficients are not re-quantized to 16 bits.

use super::clip::AudioClip;
use crate::error::{Result, StegoError};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Read;
use std::path::Path;

/// Read a WAV file into a clip with samples in [-1.0, 1.0]
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioClip> {
    let path = path.as_ref();
    let reader = WavReader::open(path)
        .map_err(|e| StegoError::Audio(format!("{}: {}", path.display(), e)))?;
    let clip = read_from(reader)?;

    log::debug!(
        "Read {}: {} frames, {} channels, {} Hz",
        path.display(),
        clip.frame_count(),
        clip.channel_count(),
        clip.sample_rate()
    );
    Ok(clip)
}

/// Read WAV data from an in-memory buffer
pub fn read_wav_bytes(bytes: &[u8]) -> Result<AudioClip> {
    let reader = WavReader::new(std::io::Cursor::new(bytes))
        .map_err(|e| StegoError::Audio(e.to_string()))?;
    read_from(reader)
}

fn read_from<R: Read>(reader: WavReader<R>) -> Result<AudioClip> {
    let spec = reader.spec();

    let samples: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| StegoError::Audio(e.to_string()))?,
        (SampleFormat::Int, bits @ 8..=32) => {
            let scale = 1.0 / (1u64 << (bits - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| StegoError::Audio(e.to_string()))?
        }
        (format, bits) => {
            return Err(StegoError::Audio(format!(
                "unsupported WAV sample format: {bits}-bit {format:?}"
            )))
        }
    };

    AudioClip::from_interleaved(spec.sample_rate, spec.channels as usize, samples)
}

/// Write a clip as 32-bit float WAV, creating parent directories as needed
pub fn write_wav<P: AsRef<Path>>(path: P, clip: &AudioClip) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let channels = u16::try_from(clip.channel_count())
        .map_err(|_| StegoError::Audio(format!("too many channels: {}", clip.channel_count())))?;
    let spec = WavSpec {
        channels,
        sample_rate: clip.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let peak = clip.peak();
    if peak > 1.0 {
        log::warn!("Writing {} with peak {:.4} above full scale", path.display(), peak);
    }

    let mut writer = WavWriter::create(path, spec).map_err(|e| StegoError::Audio(e.to_string()))?;
    for sample in clip.interleaved() {
        writer
            .write_sample(sample as f32)
            .map_err(|e| StegoError::Audio(e.to_string()))?;
    }
    writer.finalize().map_err(|e| StegoError::Audio(e.to_string()))?;

    log::debug!("Wrote {}: {} frames", path.display(), clip.frame_count());
    Ok(())
}
