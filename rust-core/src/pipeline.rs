//! File-level entry points
//!
//! Read a WAV file, run a codec on channel 0, write the result. Any further
//! channels are copied through unchanged.

use crate::audio::{read_wav, write_wav, AudioClip};
use crate::codecs::{Extraction, StegoCodec};
use crate::error::{Result, StegoError};
use std::path::Path;

/// Channel every codec operates on
pub const CARRIER_CHANNEL: usize = 0;

/// Clips before and after embedding
#[derive(Debug, Clone)]
pub struct EmbedOutcome {
    pub original: AudioClip,
    pub modified: AudioClip,
}

/// Embed `message` into channel 0 of `input` and write the result to `output`
///
/// Nothing is written when the message does not fit.
pub fn embed_file<C, P, Q>(codec: &C, input: P, message: &str, output: Q) -> Result<EmbedOutcome>
where
    C: StegoCodec + ?Sized,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let original = read_wav(input)?;
    let modified = embed_clip(codec, &original, message)?;
    write_wav(output.as_ref(), &modified)?;

    log::info!(
        "Embedded {} chars with {} into {}",
        message.chars().count(),
        codec.name(),
        output.as_ref().display()
    );
    Ok(EmbedOutcome { original, modified })
}

/// Embed into channel 0 of an in-memory clip
pub fn embed_clip<C>(codec: &C, clip: &AudioClip, message: &str) -> Result<AudioClip>
where
    C: StegoCodec + ?Sized,
{
    if clip.channel_count() > 1 {
        log::debug!("{} channels, embedding in channel {}", clip.channel_count(), CARRIER_CHANNEL);
    }
    let carrier = carrier(clip)?;
    let samples = codec.embed(&carrier, message)?;
    clip.with_channel(CARRIER_CHANNEL, &samples)
}

/// Extract from channel 0 of `input`
pub fn extract_file<C, P>(codec: &C, input: P) -> Result<Extraction>
where
    C: StegoCodec + ?Sized,
    P: AsRef<Path>,
{
    let clip = read_wav(input)?;
    extract_clip(codec, &clip)
}

/// Extract from channel 0 of an in-memory clip
pub fn extract_clip<C>(codec: &C, clip: &AudioClip) -> Result<Extraction>
where
    C: StegoCodec + ?Sized,
{
    let carrier = carrier(clip)?;
    Ok(codec.extract(&carrier))
}

fn carrier(clip: &AudioClip) -> Result<Vec<f64>> {
    clip.channel(CARRIER_CHANNEL)
        .ok_or_else(|| StegoError::Audio("clip has no channels".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::{test_tone, CoefficientForcingCodec};

    #[test]
    fn test_second_channel_untouched() {
        let left = test_tone(1024 * 80);
        let right: Vec<f64> = left.iter().map(|s| -0.5 * s).collect();
        let interleaved = left.iter().zip(&right).flat_map(|(&l, &r)| [l, r]).collect();
        let clip = AudioClip::from_interleaved(44_100, 2, interleaved).unwrap();

        let codec = CoefficientForcingCodec::default();
        let modified = embed_clip(&codec, &clip, "stereo").unwrap();

        assert_eq!(modified.channel(1).unwrap(), right);
        assert_ne!(modified.channel(0).unwrap(), left);
        assert_eq!(extract_clip(&codec, &modified).unwrap().message(), Some("stereo"));
    }

    #[test]
    fn test_capacity_error_propagates() {
        let clip = AudioClip::mono(44_100, test_tone(2048));
        let err = embed_clip(&CoefficientForcingCodec::default(), &clip, "too long").unwrap_err();
        assert!(matches!(err, StegoError::Capacity { .. }));
    }
}
