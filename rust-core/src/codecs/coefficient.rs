//! Coefficient-forcing codec (DCT)
//!
//! The channel is cut into consecutive `block_size` blocks, one bit per block.
//! In block `i` the orthonormal DCT coefficient `target_coefficient` is forced
//! to `bit1_value` or `bit0_value`. Blocks are always visited from block 0, in
//! order, on both sides.

use super::{check_capacity, decode_slots, Extraction, StegoCodec};
use crate::config::CoefficientConfig;
use crate::error::Result;
use crate::message::frame_message;
use crate::transform::DctEngine;

#[derive(Debug, Clone, Default)]
pub struct CoefficientForcingCodec {
    config: CoefficientConfig,
}

impl CoefficientForcingCodec {
    pub fn new(config: CoefficientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CoefficientConfig {
        &self.config
    }

    #[inline]
    fn decide(&self, coefficient: f64) -> bool {
        coefficient > self.config.threshold
    }
}

impl StegoCodec for CoefficientForcingCodec {
    fn name(&self) -> &'static str {
        "dct"
    }

    fn capacity(&self, len: usize) -> usize {
        len / self.config.block_size
    }

    fn embed(&self, samples: &[f64], message: &str) -> Result<Vec<f64>> {
        let bits = frame_message(message)?;
        let capacity = self.capacity(samples.len());
        log::debug!(
            "DCT blocks: {} of {} samples, frame: {} bits",
            capacity,
            self.config.block_size,
            bits.len()
        );
        check_capacity(bits.len(), capacity)?;

        let engine = DctEngine::new(self.config.block_size);
        let target = self.config.target_coefficient;
        let mut modified = samples.to_vec();

        for (block, bit) in modified.chunks_exact_mut(self.config.block_size).zip(bits.iter()) {
            let mut coefficients = engine.forward(block);
            coefficients[target] = if bit {
                self.config.bit1_value
            } else {
                self.config.bit0_value
            };
            block.copy_from_slice(&engine.inverse(&coefficients));
        }

        log::debug!("Embedded {} bits at coefficient {}", bits.len(), target);
        Ok(modified)
    }

    fn extract(&self, samples: &[f64]) -> Extraction {
        let capacity = self.capacity(samples.len());
        if capacity == 0 {
            return decode_slots(std::iter::empty(), capacity);
        }

        let engine = DctEngine::new(self.config.block_size);
        let target = self.config.target_coefficient;

        let decisions = samples
            .chunks_exact(self.config.block_size)
            .enumerate()
            .map(|(i, block)| {
                let coefficient = engine.forward(block)[target];
                if i < 5 {
                    log::debug!(
                        "Block {}: coefficient {:.6} -> {}",
                        i,
                        coefficient,
                        self.decide(coefficient) as u8
                    );
                }
                self.decide(coefficient)
            });

        decode_slots(decisions, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::{test_tone, ExtractionFailure, FailureReason};
    use crate::error::StegoError;

    fn small_codec() -> CoefficientForcingCodec {
        CoefficientForcingCodec::new(CoefficientConfig {
            block_size: 256,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_round_trip_default_blocks() {
        let codec = CoefficientForcingCodec::default();
        let samples = test_tone(1024 * 200);

        let modified = codec.embed(&samples, "New Message Test Test").unwrap();
        assert_eq!(codec.extract(&modified).message(), Some("New Message Test Test"));
    }

    #[test]
    fn test_untouched_tail() {
        let codec = small_codec();
        let samples = test_tone(256 * 100 + 77);

        let modified = codec.embed(&samples, "abc").unwrap();
        let used = (3 * 8 + 16) * 256;

        assert_ne!(modified[..used], samples[..used]);
        assert_eq!(modified[used..], samples[used..]);
    }

    #[test]
    fn test_capacity_boundary() {
        let codec = CoefficientForcingCodec::default();
        let samples = test_tone(1024 * 32 + 500);
        assert_eq!(codec.capacity(samples.len()), 32);

        let modified = codec.embed(&samples, "Hi").unwrap();
        assert_eq!(codec.extract(&modified).message(), Some("Hi"));

        let before = samples.clone();
        let err = codec.embed(&samples, "Hi!").unwrap_err();
        assert!(matches!(err, StegoError::Capacity { needed: 40, available: 32 }));
        assert_eq!(samples, before);
    }

    #[test]
    fn test_deterministic() {
        let codec = small_codec();
        let samples = test_tone(256 * 64);
        assert_eq!(
            codec.embed(&samples, "repeat").unwrap(),
            codec.embed(&samples, "repeat").unwrap()
        );
    }

    #[test]
    fn test_extract_short_or_blank() {
        let codec = CoefficientForcingCodec::default();

        assert!(matches!(
            codec.extract(&test_tone(1000)),
            Extraction::Failed(ExtractionFailure { reason: FailureReason::ChannelTooShort, .. })
        ));
        assert!(matches!(
            codec.extract(&vec![0.0; 1024 * 40]),
            Extraction::Failed(ExtractionFailure { reason: FailureReason::MarkerNotFound, .. })
        ));
    }

    #[test]
    fn test_extract_tolerates_nan() {
        let codec = small_codec();
        let samples = vec![f64::NAN; 256 * 20];
        assert!(!codec.extract(&samples).is_recovered());
    }
}
