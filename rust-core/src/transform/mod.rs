//! Transforms carrying the hidden bits

pub mod dct;
pub mod dwt;
pub mod fft;

pub use dct::DctEngine;
pub use dwt::{subband_geometry, WaveletDecomposition};
pub use fft::{peak_abs, SpectrumEngine};
