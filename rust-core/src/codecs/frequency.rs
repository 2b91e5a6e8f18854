//! Frequency-amplitude codec (DFT)
//!
//! Bits live in the magnitudes of strided bins of the whole-channel spectrum.
//! Bin `start_index + i*step` gets one of two fixed magnitudes; its phase is
//! kept and the negative-frequency twin is set to the conjugate so the
//! inverse stays real.

use super::{check_capacity, decode_slots, ExtractionFailure, Extraction, FailureReason, StegoCodec};
use crate::config::FrequencyConfig;
use crate::error::{Result, StegoError};
use crate::message::{frame_message, BitString};
use crate::transform::{peak_abs, SpectrumEngine};
use num_complex::Complex;

#[derive(Debug, Clone, Default)]
pub struct FrequencyAmplitudeCodec {
    config: FrequencyConfig,
}

impl FrequencyAmplitudeCodec {
    pub fn new(config: FrequencyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FrequencyConfig {
        &self.config
    }

    /// Spectral bin carrying bit `i`
    #[inline]
    fn bin(&self, i: usize) -> usize {
        self.config.start_index + i * self.config.step
    }

    /// Bit decision for one bin magnitude; a magnitude equal to the threshold reads as `0`
    #[inline]
    pub fn decide(&self, magnitude: f64) -> bool {
        magnitude > self.config.threshold
    }
}

impl StegoCodec for FrequencyAmplitudeCodec {
    fn name(&self) -> &'static str {
        "dft"
    }

    fn capacity(&self, len: usize) -> usize {
        (len / 2).saturating_sub(self.config.start_index) / self.config.step
    }

    fn embed(&self, samples: &[f64], message: &str) -> Result<Vec<f64>> {
        let bits = frame_message(message)?;
        let capacity = self.capacity(samples.len());
        log::debug!("DFT capacity: {} bits, frame: {} bits", capacity, bits.len());
        check_capacity(bits.len(), capacity)?;

        let peak = peak_abs(samples);
        if !(peak > 0.0) {
            return Err(StegoError::SilentChannel);
        }
        let normalized: Vec<f64> = samples.iter().map(|&s| s / peak).collect();

        let n = normalized.len();
        let engine = SpectrumEngine::new(n);
        let mut spectrum = engine.forward(&normalized);

        let max_magnitude = spectrum.iter().fold(0.0f64, |m, c| m.max(c.norm()));
        let ceiling = max_magnitude * self.config.ceiling_ratio;
        log::debug!("Spectrum peak magnitude: {max_magnitude}");

        for (i, bit) in bits.iter().enumerate() {
            let k = self.bin(i);
            let target = if bit {
                self.config.bit1_amplitude
            } else {
                self.config.bit0_amplitude
            };
            let phase = spectrum[k].arg();

            spectrum[k] = Complex::from_polar(target.min(ceiling), phase);
            spectrum[n - k] = spectrum[k].conj();
        }

        let mut modified = engine.inverse_real(spectrum);

        // Rescale only when the edit pushed the channel out of range
        let out_peak = peak_abs(&modified);
        if out_peak > 1.0 {
            modified.iter_mut().for_each(|s| *s /= out_peak);
            log::debug!("Rescaled output by 1/{out_peak}");
        }

        log::debug!(
            "Embedded {} bits in bins {}..={}",
            bits.len(),
            self.bin(0),
            self.bin(bits.len() - 1)
        );
        Ok(modified)
    }

    fn extract(&self, samples: &[f64]) -> Extraction {
        let capacity = self.capacity(samples.len());
        if capacity == 0 {
            return decode_slots(std::iter::empty(), capacity);
        }

        let engine = SpectrumEngine::new(samples.len());
        let magnitudes = match engine.magnitudes(samples) {
            Ok(magnitudes) => magnitudes,
            Err(e) => {
                log::warn!("DFT extraction failed: {e}");
                return Extraction::Failed(ExtractionFailure::new(
                    FailureReason::TransformFailed,
                    BitString::new(),
                ));
            }
        };

        for i in 0..capacity.min(10) {
            let k = self.bin(i);
            log::debug!("Bin {}: {:.8} -> {}", k, magnitudes[k], self.decide(magnitudes[k]) as u8);
        }

        decode_slots((0..capacity).map(|i| self.decide(magnitudes[self.bin(i)])), capacity)
    }
}
