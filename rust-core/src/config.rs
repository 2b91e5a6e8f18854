//! Codec configuration
//!
//! Each codec is built from an explicit, immutable config. Defaults carry the
//! tuned constants; a JSON file can override any subset of them.

use crate::error::{Result, StegoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Frequency-amplitude (DFT) codec configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// First spectral bin carrying a bit
    pub start_index: usize,

    /// Distance between consecutive carrier bins
    pub step: usize,

    /// Bin magnitude written for a `1`
    pub bit1_amplitude: f64,

    /// Bin magnitude written for a `0`
    pub bit0_amplitude: f64,

    /// Magnitudes strictly above this decode as `1`
    pub threshold: f64,

    /// Written magnitudes are capped at this fraction of the spectrum peak
    pub ceiling_ratio: f64,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            start_index: 2000,
            step: 2,
            bit1_amplitude: 0.01,
            bit0_amplitude: 0.001,
            threshold: 0.005,
            ceiling_ratio: 0.1,
        }
    }
}

impl FrequencyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_index == 0 {
            return invalid("frequency.start_index must skip the DC bin");
        }
        if self.step == 0 {
            return invalid("frequency.step must be at least 1");
        }
        if !(self.bit0_amplitude >= 0.0 && self.bit0_amplitude <= self.threshold) {
            return invalid("frequency.bit0_amplitude must lie in [0, threshold]");
        }
        if !(self.bit1_amplitude > self.threshold) {
            return invalid("frequency.bit1_amplitude must exceed threshold");
        }
        if !(self.ceiling_ratio > 0.0) {
            return invalid("frequency.ceiling_ratio must be positive");
        }
        Ok(())
    }
}

/// Coefficient-forcing (DCT) codec configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoefficientConfig {
    /// Samples per block; one bit per block
    pub block_size: usize,

    /// DCT coefficient overwritten in each block
    pub target_coefficient: usize,

    /// Coefficient value written for a `1`
    pub bit1_value: f64,

    /// Coefficient value written for a `0`
    pub bit0_value: f64,

    /// Coefficients strictly above this decode as `1`
    pub threshold: f64,
}

impl Default for CoefficientConfig {
    fn default() -> Self {
        Self {
            block_size: 1024,
            target_coefficient: 5,
            bit1_value: 0.1,
            bit0_value: -0.1,
            threshold: 0.0,
        }
    }
}

impl CoefficientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return invalid("coefficient.block_size must be at least 1");
        }
        if self.target_coefficient >= self.block_size {
            return invalid("coefficient.target_coefficient must lie inside the block");
        }
        if !(self.bit1_value > self.threshold && self.bit0_value <= self.threshold) {
            return invalid("coefficient values must straddle the threshold");
        }
        Ok(())
    }
}

/// Supported wavelet families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveletKind {
    /// Haar wavelet, also known as Daubechies-1
    #[serde(alias = "db1")]
    Haar,
}

/// Wavelet fractional-part (DWT) codec configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveletConfig {
    pub wavelet: WaveletKind,

    /// Number of decomposition levels
    pub level: usize,

    /// Position in `[cA_L, cD_L, ..., cD_1]`; must select a detail band
    pub subband_index: usize,

    /// Distance between consecutive carrier coefficients
    pub stride: usize,

    /// Fractional part written for a `1`
    pub bit1_fraction: f64,

    /// Fractional part written for a `0`
    pub bit0_fraction: f64,
}

impl Default for WaveletConfig {
    fn default() -> Self {
        Self {
            wavelet: WaveletKind::Haar,
            level: 5,
            subband_index: 2,
            stride: 100,
            bit1_fraction: 0.75,
            bit0_fraction: 0.25,
        }
    }
}

impl WaveletConfig {
    pub fn validate(&self) -> Result<()> {
        if self.level == 0 {
            return invalid("wavelet.level must be at least 1");
        }
        if self.subband_index == 0 || self.subband_index > self.level {
            return invalid("wavelet.subband_index must select a detail band in 1..=level");
        }
        if self.stride == 0 {
            return invalid("wavelet.stride must be at least 1");
        }
        if !(0.5..1.0).contains(&self.bit1_fraction) {
            return invalid("wavelet.bit1_fraction must lie in [0.5, 1)");
        }
        if !(0.0..0.5).contains(&self.bit0_fraction) {
            return invalid("wavelet.bit0_fraction must lie in [0, 0.5)");
        }
        Ok(())
    }
}

/// Configuration for all three codecs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub frequency: FrequencyConfig,
    pub coefficient: CoefficientConfig,
    pub wavelet: WaveletConfig,
}

impl StegoConfig {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.frequency.validate()?;
        self.coefficient.validate()?;
        self.wavelet.validate()
    }
}

fn invalid(reason: &str) -> Result<()> {
    Err(StegoError::InvalidConfig(reason.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        StegoConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StegoConfig::from_json_str(
            r#"{ "coefficient": { "block_size": 512 }, "wavelet": { "wavelet": "db1", "stride": 10 } }"#,
        )
        .unwrap();

        assert_eq!(config.coefficient.block_size, 512);
        assert_eq!(config.coefficient.target_coefficient, 5);
        assert_eq!(config.wavelet.stride, 10);
        assert_eq!(config.wavelet.wavelet, WaveletKind::Haar);
        assert_eq!(config.frequency, FrequencyConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err =
            StegoConfig::from_json_str(r#"{ "wavelet": { "subband_index": 0 } }"#).unwrap_err();
        assert!(matches!(err, StegoError::InvalidConfig(_)));

        let config = CoefficientConfig {
            target_coefficient: 1024,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FrequencyConfig {
            bit1_amplitude: 0.005,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = StegoConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, StegoError::Config(_)));
    }
}
