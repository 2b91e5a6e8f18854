//! Spectral Stego - Transform-Domain Audio Steganography Core
//!
//! Hides short text messages in the DFT, DCT or DWT coefficients of a mono
//! channel and recovers them by scanning for an end marker. Optional Python
//! bindings are built with the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod analysis;
pub mod audio;
pub mod codecs;
pub mod config;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod transform;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use analysis::{bit_error_rate, QualityReport};
pub use audio::{read_wav, write_wav, AudioClip};
pub use codecs::{
    CoefficientForcingCodec, Extraction, ExtractionFailure, FailureReason,
    FrequencyAmplitudeCodec, Method, StegoCodec, Strategy, WaveletFractionCodec,
};
pub use config::{CoefficientConfig, FrequencyConfig, StegoConfig, WaveletConfig, WaveletKind};
pub use error::{Result, StegoError};
pub use message::{binary_to_text, frame_message, text_to_binary, BitString};
pub use pipeline::{embed_file, extract_file, EmbedOutcome};
