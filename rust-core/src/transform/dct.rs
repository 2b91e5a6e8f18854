//! Orthonormal DCT-II / DCT-III over fixed-size blocks
//!
//! Both directions run through a 2N-point complex FFT:
//! forward mirrors the block to even symmetry, inverse feeds the
//! phase-shifted coefficients into the upper-half-zeroed spectrum.

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Block DCT engine
pub struct DctEngine {
    /// Block length N
    len: usize,

    /// 2N-point forward FFT
    fft: Arc<dyn Fft<f64>>,

    /// 2N-point inverse FFT (unnormalized)
    ifft: Arc<dyn Fft<f64>>,

    /// Half-sample shift e^{-iπk/2N}, k = 0..N
    twiddles: Vec<Complex<f64>>,

    /// Orthonormal scale per coefficient: sqrt(1/N) for k = 0, sqrt(2/N) otherwise
    weights: Vec<f64>,
}

impl DctEngine {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(2 * len);
        let ifft = planner.plan_fft_inverse(2 * len);

        let twiddles = (0..len)
            .map(|k| Complex::from_polar(1.0, -PI * k as f64 / (2 * len) as f64))
            .collect();

        let weights = (0..len)
            .map(|k| {
                if k == 0 {
                    (1.0 / len as f64).sqrt()
                } else {
                    (2.0 / len as f64).sqrt()
                }
            })
            .collect();

        Self {
            len,
            fft,
            ifft,
            twiddles,
            weights,
        }
    }

    /// Orthonormal DCT-II of one block
    ///
    /// X[k] = w[k] * Σ x[n] cos(πk(2n+1) / 2N)
    pub fn forward(&self, block: &[f64]) -> Vec<f64> {
        let n = self.len;
        let mut buffer = vec![Complex::new(0.0, 0.0); 2 * n];
        for (i, &x) in block.iter().take(n).enumerate() {
            buffer[i] = Complex::new(x, 0.0);
            buffer[2 * n - 1 - i] = Complex::new(x, 0.0);
        }

        self.fft.process(&mut buffer);

        (0..n)
            .map(|k| 0.5 * (self.twiddles[k] * buffer[k]).re * self.weights[k])
            .collect()
    }

    /// Orthonormal DCT-III, the exact inverse of [`forward`](Self::forward)
    ///
    /// x[n] = Σ w[k] X[k] cos(πk(2n+1) / 2N)
    pub fn inverse(&self, coefficients: &[f64]) -> Vec<f64> {
        let n = self.len;
        let mut buffer = vec![Complex::new(0.0, 0.0); 2 * n];
        for (k, &c) in coefficients.iter().take(n).enumerate() {
            buffer[k] = self.twiddles[k].conj() * (c * self.weights[k]);
        }

        self.ifft.process(&mut buffer);

        buffer[..n].iter().map(|z| z.re).collect()
    }
}
