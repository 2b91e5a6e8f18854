//! Whole-channel FFT engine
//!
//! Complex forward/inverse transforms via rustfft for spectrum editing, and a
//! realfft path for the positive-frequency magnitudes needed on extraction.

use crate::error::{Result, StegoError};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT engine sized for one channel
pub struct SpectrumEngine {
    /// Transform length (number of samples)
    len: usize,

    /// Complex forward transform
    forward: Arc<dyn Fft<f64>>,

    /// Complex inverse transform (unnormalized)
    inverse: Arc<dyn Fft<f64>>,

    /// Real-input forward transform
    r2c: Arc<dyn RealToComplex<f64>>,
}

impl SpectrumEngine {
    /// Create new engine
    ///
    /// # Arguments
    /// * `len` - Transform length, equal to the channel length
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);

        let mut real_planner = RealFftPlanner::<f64>::new();
        let r2c = real_planner.plan_fft_forward(len);

        Self {
            len,
            forward,
            inverse,
            r2c,
        }
    }

    /// Full complex spectrum X[k] for k = 0..len
    pub fn forward(&self, signal: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = signal
            .iter()
            .take(self.len)
            .map(|&s| Complex::new(s, 0.0))
            .collect();
        buffer.resize(self.len, Complex::new(0.0, 0.0));

        self.forward.process(&mut buffer);
        buffer
    }

    /// Inverse transform, scaled by 1/N, keeping the real part
    pub fn inverse_real(&self, mut spectrum: Vec<Complex<f64>>) -> Vec<f64> {
        spectrum.resize(self.len, Complex::new(0.0, 0.0));
        self.inverse.process(&mut spectrum);

        let scale = 1.0 / self.len as f64;
        spectrum.iter().map(|c| c.re * scale).collect()
    }

    /// Magnitude spectrum |X[k]| for k = 0..=len/2 (positive frequencies only)
    pub fn magnitudes(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let mut input = self.r2c.make_input_vec();
        let copy_len = signal.len().min(self.len);
        input[..copy_len].copy_from_slice(&signal[..copy_len]);

        let mut output = self.r2c.make_output_vec();
        self.r2c
            .process(&mut input, &mut output)
            .map_err(|e| StegoError::Transform(e.to_string()))?;

        Ok(output.iter().map(|c| c.norm()).collect())
    }
}

/// Largest absolute sample value
pub fn peak_abs(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0, |peak, &s| peak.max(s.abs()))
}
