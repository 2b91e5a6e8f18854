//! Wavelet fractional-part codec (DWT)
//!
//! One detail subband of a multi-level Haar decomposition carries the bits:
//! coefficient `i*stride` keeps its integer part and gets its fractional part
//! replaced by `bit1_fraction` or `bit0_fraction`. A fractional part of 0.5
//! or more reads back as `1`.

use super::{check_capacity, decode_slots, Extraction, StegoCodec};
use crate::config::WaveletConfig;
use crate::error::{Result, StegoError};
use crate::message::frame_message;
use crate::transform::{subband_geometry, WaveletDecomposition};

/// Fractional parts at or above this decode as `1`
const FRACTION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct WaveletFractionCodec {
    config: WaveletConfig,
}

impl WaveletFractionCodec {
    pub fn new(config: WaveletConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WaveletConfig {
        &self.config
    }

    fn decompose(&self, samples: &[f64]) -> WaveletDecomposition {
        WaveletDecomposition::decompose(samples, self.config.wavelet, self.config.level)
    }

    #[inline]
    fn decide(coefficient: f64) -> bool {
        coefficient - coefficient.floor() >= FRACTION_THRESHOLD
    }
}

/// Slots in a subband of `band_len` coefficients of which the first `unpadded` are real
fn slot_count(band_len: usize, unpadded: usize, stride: usize) -> usize {
    (band_len / stride).min(unpadded.div_ceil(stride))
}

impl StegoCodec for WaveletFractionCodec {
    fn name(&self) -> &'static str {
        "dwt"
    }

    fn capacity(&self, len: usize) -> usize {
        subband_geometry(len, self.config.level, self.config.subband_index)
            .map(|(band_len, input_len)| slot_count(band_len, input_len / 2, self.config.stride))
            .unwrap_or(0)
    }

    fn embed(&self, samples: &[f64], message: &str) -> Result<Vec<f64>> {
        let bits = frame_message(message)?;
        let capacity = self.capacity(samples.len());
        check_capacity(bits.len(), capacity)?;

        let mut decomposition = self.decompose(samples);
        let stride = self.config.stride;
        let band = decomposition
            .subband_mut(self.config.subband_index)
            .ok_or_else(|| StegoError::InvalidConfig("subband index out of range".into()))?;
        log::debug!(
            "DWT subband length: {}, slots: {}, frame: {} bits",
            band.len(),
            capacity,
            bits.len()
        );

        for (i, bit) in bits.iter().enumerate() {
            let coefficient = &mut band[i * stride];
            let fraction = if bit {
                self.config.bit1_fraction
            } else {
                self.config.bit0_fraction
            };
            *coefficient = coefficient.floor() + fraction;
        }

        let mut modified = decomposition.reconstruct();
        modified.truncate(samples.len());

        log::debug!("Embedded {} bits in subband {}", bits.len(), self.config.subband_index);
        Ok(modified)
    }

    fn extract(&self, samples: &[f64]) -> Extraction {
        let capacity = self.capacity(samples.len());
        if capacity == 0 {
            return decode_slots(std::iter::empty(), capacity);
        }

        let decomposition = self.decompose(samples);
        let band = decomposition
            .subband(self.config.subband_index)
            .unwrap_or_default();

        for (i, &c) in band.iter().step_by(self.config.stride).take(5).enumerate() {
            log::debug!(
                "Coefficient {}: fraction {:.6} -> {}",
                i * self.config.stride,
                c - c.floor(),
                Self::decide(c) as u8
            );
        }

        let decisions = band.iter().step_by(self.config.stride).map(|&c| Self::decide(c));
        decode_slots(decisions, capacity)
    }
}
