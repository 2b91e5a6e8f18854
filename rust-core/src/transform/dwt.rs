//! Multi-level Haar wavelet decomposition
//!
//! Subbands are addressed in the conventional order `[cA_L, cD_L, ..., cD_1]`.
//! Odd-length inputs are extended by repeating the last sample, so every level
//! produces ceil(n/2) coefficients and reconstruction may overshoot the input
//! by one sample; callers truncate.

use crate::config::WaveletKind;
use std::f64::consts::FRAC_1_SQRT_2;

/// Result of a multi-level decomposition
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletDecomposition {
    kind: WaveletKind,

    /// Deepest approximation cA_L
    approximation: Vec<f64>,

    /// Detail bands, deepest first: cD_L, ..., cD_1
    details: Vec<Vec<f64>>,
}

impl WaveletDecomposition {
    /// Decompose `signal` into `level` levels
    pub fn decompose(signal: &[f64], kind: WaveletKind, level: usize) -> Self {
        let mut approximation = signal.to_vec();
        let mut details = Vec::with_capacity(level);

        for _ in 0..level {
            let (a, d) = analysis_step(kind, &approximation);
            approximation = a;
            details.push(d);
        }
        details.reverse();

        Self {
            kind,
            approximation,
            details,
        }
    }

    /// Subband by list index: 0 is cA_L, i >= 1 is cD_{L-i+1}
    pub fn subband(&self, index: usize) -> Option<&[f64]> {
        match index {
            0 => Some(&self.approximation),
            i => self.details.get(i - 1).map(Vec::as_slice),
        }
    }

    pub fn subband_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        match index {
            0 => Some(&mut self.approximation),
            i => self.details.get_mut(i - 1).map(Vec::as_mut_slice),
        }
    }

    /// Inverse transform; output length is 2 * len(cD_1)
    pub fn reconstruct(&self) -> Vec<f64> {
        let mut approximation = self.approximation.clone();

        for detail in &self.details {
            approximation.truncate(detail.len());
            approximation = synthesis_step(self.kind, &approximation, detail);
        }

        approximation
    }
}

/// Lengths of subband `index` and of the level input it was computed from,
/// without running the transform
pub fn subband_geometry(signal_len: usize, level: usize, index: usize) -> Option<(usize, usize)> {
    if index > level {
        return None;
    }
    let depth = if index == 0 { level } else { level - index + 1 };

    let mut input_len = signal_len;
    for _ in 1..depth {
        input_len = input_len.div_ceil(2);
    }
    Some((input_len.div_ceil(2), input_len))
}

fn analysis_step(kind: WaveletKind, signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
    match kind {
        WaveletKind::Haar => {
            let half = signal.len().div_ceil(2);
            let mut approximation = Vec::with_capacity(half);
            let mut detail = Vec::with_capacity(half);

            for pair in signal.chunks(2) {
                let x0 = pair[0];
                let x1 = pair.get(1).copied().unwrap_or(x0);
                approximation.push((x0 + x1) * FRAC_1_SQRT_2);
                detail.push((x0 - x1) * FRAC_1_SQRT_2);
            }

            (approximation, detail)
        }
    }
}

fn synthesis_step(kind: WaveletKind, approximation: &[f64], detail: &[f64]) -> Vec<f64> {
    match kind {
        WaveletKind::Haar => approximation
            .iter()
            .zip(detail.iter())
            .flat_map(|(&a, &d)| [(a + d) * FRAC_1_SQRT_2, (a - d) * FRAC_1_SQRT_2])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_level_haar() {
        let dec = WaveletDecomposition::decompose(&[1.0, 2.0, 3.0, 5.0], WaveletKind::Haar, 1);

        assert_relative_eq!(dec.subband(0).unwrap()[0], 3.0 * FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(dec.subband(1).unwrap()[0], -FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(dec.subband(1).unwrap()[1], -2.0 * FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_subband_order_and_lengths() {
        let signal = vec![0.25; 1000];
        let dec = WaveletDecomposition::decompose(&signal, WaveletKind::Haar, 3);

        // [cA3, cD3, cD2, cD1]
        assert_eq!(dec.subband(0).unwrap().len(), 125);
        assert_eq!(dec.subband(1).unwrap().len(), 125);
        assert_eq!(dec.subband(2).unwrap().len(), 250);
        assert_eq!(dec.subband(3).unwrap().len(), 500);
        assert!(dec.subband(4).is_none());

        for index in 0..=3 {
            let (len, _) = subband_geometry(signal.len(), 3, index).unwrap();
            assert_eq!(len, dec.subband(index).unwrap().len());
        }
    }

    #[test]
    fn test_reconstruct_odd_length() {
        let signal: Vec<f64> = (0..1001).map(|i| (0.013 * i as f64).sin()).collect();
        let dec = WaveletDecomposition::decompose(&signal, WaveletKind::Haar, 5);

        let mut restored = dec.reconstruct();
        assert!(restored.len() >= signal.len());
        restored.truncate(signal.len());

        for (a, b) in signal.iter().zip(restored.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_padded_subband_geometry() {
        // 1001 -> cD1 has 501 coefficients, the last one comes from padding
        let signal = vec![0.0; 1001];
        let dec = WaveletDecomposition::decompose(&signal, WaveletKind::Haar, 2);

        assert_eq!(dec.subband(2).unwrap().len(), 501);
        assert_eq!(subband_geometry(1001, 2, 2), Some((501, 1001)));
        assert_eq!(subband_geometry(1001, 2, 1), Some((251, 501)));
    }

    #[test]
    fn test_empty_signal() {
        let dec = WaveletDecomposition::decompose(&[], WaveletKind::Haar, 4);
        assert!(dec.subband(2).unwrap().is_empty());
        assert!(dec.reconstruct().is_empty());
    }
}
