//! Distortion and bit error metrics
//!
//! All signal metrics compare the common prefix of the two channels.

use crate::codecs::Extraction;
use crate::message::text_to_binary;

/// Distortion introduced by embedding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// Signal-to-noise ratio in dB
    pub snr_db: f64,

    /// Peak signal-to-noise ratio in dB, peak taken from the original
    pub psnr_db: f64,

    /// Mean squared error
    pub mse: f64,
}

impl QualityReport {
    pub fn measure(original: &[f64], modified: &[f64]) -> Self {
        Self {
            snr_db: snr_db(original, modified),
            psnr_db: psnr_db(original, modified),
            mse: mse(original, modified),
        }
    }
}

fn noise_energy(original: &[f64], modified: &[f64]) -> (f64, usize) {
    original
        .iter()
        .zip(modified)
        .fold((0.0, 0), |(sum, n), (&o, &m)| (sum + (o - m) * (o - m), n + 1))
}

/// Mean squared error; 0.0 for empty input
pub fn mse(original: &[f64], modified: &[f64]) -> f64 {
    match noise_energy(original, modified) {
        (_, 0) => 0.0,
        (energy, n) => energy / n as f64,
    }
}

/// 10·log10(Σ original² / Σ noise²); infinite when the channels are identical
pub fn snr_db(original: &[f64], modified: &[f64]) -> f64 {
    let (noise, n) = noise_energy(original, modified);
    let signal: f64 = original.iter().take(n).map(|s| s * s).sum();

    if noise == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (signal / noise).log10()
}

/// 20·log10(max|original| / rms(noise)); infinite when the channels are identical
pub fn psnr_db(original: &[f64], modified: &[f64]) -> f64 {
    let rms = mse(original, modified).sqrt();
    let n = original.len().min(modified.len());
    let peak = original.iter().take(n).fold(0.0f64, |p, s| p.max(s.abs()));

    if rms == 0.0 {
        return f64::INFINITY;
    }
    20.0 * (peak / rms).log10()
}

/// Fraction of differing message bits
///
/// A failed extraction counts as 1.0. Otherwise the bits of both messages are
/// compared over the shorter of the two.
pub fn bit_error_rate(original: &str, extracted: &Extraction) -> f64 {
    let Some(message) = extracted.message() else {
        return 1.0;
    };
    let (Ok(expected), Ok(actual)) = (text_to_binary(original), text_to_binary(message)) else {
        return 1.0;
    };

    let compared = expected.len().min(actual.len());
    if compared == 0 {
        return if expected.len() == actual.len() { 0.0 } else { 1.0 };
    }

    let errors = expected
        .iter()
        .zip(actual.iter())
        .filter(|(a, b)| a != b)
        .count();
    errors as f64 / compared as f64
}
