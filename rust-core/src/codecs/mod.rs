//! Embedding strategies
//!
//! Three transform-domain codecs share one contract: `embed` returns a new
//! channel carrying the framed message, `extract` scans slots in order until
//! the end marker appears.

pub mod coefficient;
pub mod frequency;
pub mod wavelet;

pub use coefficient::CoefficientForcingCodec;
pub use frequency::FrequencyAmplitudeCodec;
pub use wavelet::WaveletFractionCodec;

use crate::config::StegoConfig;
use crate::error::{Result, StegoError};
use crate::message::{binary_to_text, BitString, MarkerScanner, MARKER_LEN};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Common interface of all embedding strategies
pub trait StegoCodec {
    /// Short method name (`dft`, `dct`, `dwt`)
    fn name(&self) -> &'static str;

    /// Number of bit slots a channel of `len` samples offers
    fn capacity(&self, len: usize) -> usize;

    /// Embed `message` into a copy of `samples`
    ///
    /// The framed message (bits + end marker) must fit in [`capacity`](Self::capacity);
    /// otherwise nothing is computed and [`StegoError::Capacity`] is returned.
    fn embed(&self, samples: &[f64], message: &str) -> Result<Vec<f64>>;

    /// Recover a message; never panics, failures are reported as data
    fn extract(&self, samples: &[f64]) -> Extraction;
}

/// Why an extraction produced no message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Every slot was scanned without meeting the end marker
    MarkerNotFound,
    /// The channel offers fewer slots than the marker itself needs
    ChannelTooShort,
    /// The transform could not be computed
    TransformFailed,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerNotFound => write!(f, "end marker not found"),
            Self::ChannelTooShort => write!(f, "channel too short to hold a message"),
            Self::TransformFailed => write!(f, "transform failed"),
        }
    }
}

/// Failed extraction with the raw bits read, for diagnostics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Extraction failed: {reason} after {} bits", .bits.len())]
pub struct ExtractionFailure {
    pub reason: FailureReason,
    pub bits: BitString,
}

impl ExtractionFailure {
    pub fn new(reason: FailureReason, bits: BitString) -> Self {
        Self { reason, bits }
    }
}

/// Outcome of [`StegoCodec::extract`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Recovered(String),
    Failed(ExtractionFailure),
}

impl Extraction {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    /// Recovered message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Recovered(message) => Some(message),
            Self::Failed(_) => None,
        }
    }

    /// Failure details, if no message was recovered
    pub fn failure(&self) -> Option<&ExtractionFailure> {
        match self {
            Self::Recovered(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> std::result::Result<String, ExtractionFailure> {
        match self {
            Self::Recovered(message) => Ok(message),
            Self::Failed(failure) => Err(failure),
        }
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recovered(message) => f.write_str(message),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

/// Fail before touching the channel when the frame does not fit
pub(crate) fn check_capacity(needed: usize, available: usize) -> Result<()> {
    if needed > available {
        return Err(StegoError::Capacity { needed, available });
    }
    Ok(())
}

/// Collect slot decisions until the end marker and decode the payload
///
/// `decisions` is consumed lazily, so transforms behind it only run for the
/// slots actually read.
pub(crate) fn decode_slots<I>(decisions: I, capacity: usize) -> Extraction
where
    I: IntoIterator<Item = bool>,
{
    if capacity < MARKER_LEN {
        return Extraction::Failed(ExtractionFailure::new(
            FailureReason::ChannelTooShort,
            BitString::new(),
        ));
    }

    let mut scanner = MarkerScanner::new();
    let mut bits = BitString::with_capacity(capacity.min(4096));

    for bit in decisions.into_iter().take(capacity) {
        bits.push(bit);
        if scanner.push(bit) {
            log::debug!("End marker found at slot {}", bits.len() - 1);
            bits.truncate(scanner.payload_len());
            return Extraction::Recovered(binary_to_text(&bits));
        }
    }

    log::warn!("End marker not found in {} slots: {}...", bits.len(), bits.preview(100));
    Extraction::Failed(ExtractionFailure::new(FailureReason::MarkerNotFound, bits))
}

/// Embedding method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Frequency-amplitude modulation
    Dft,
    /// Block coefficient forcing
    Dct,
    /// Wavelet fractional part
    Dwt,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Dft, Method::Dct, Method::Dwt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Dft => "dft",
            Method::Dct => "dct",
            Method::Dwt => "dwt",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dft" | "frequency" => Ok(Method::Dft),
            "dct" | "coefficient" => Ok(Method::Dct),
            "dwt" | "wavelet" => Ok(Method::Dwt),
            other => Err(StegoError::InvalidConfig(format!("unknown method '{other}'"))),
        }
    }
}

/// Closed set of configured strategies
#[derive(Debug, Clone)]
pub enum Strategy {
    Frequency(FrequencyAmplitudeCodec),
    Coefficient(CoefficientForcingCodec),
    Wavelet(WaveletFractionCodec),
}

impl Strategy {
    /// Build the codec for `method` from its section of `config`
    pub fn new(method: Method, config: &StegoConfig) -> Result<Self> {
        Ok(match method {
            Method::Dft => {
                Strategy::Frequency(FrequencyAmplitudeCodec::new(config.frequency.clone())?)
            }
            Method::Dct => {
                Strategy::Coefficient(CoefficientForcingCodec::new(config.coefficient.clone())?)
            }
            Method::Dwt => Strategy::Wavelet(WaveletFractionCodec::new(config.wavelet.clone())?),
        })
    }

    pub fn method(&self) -> Method {
        match self {
            Strategy::Frequency(_) => Method::Dft,
            Strategy::Coefficient(_) => Method::Dct,
            Strategy::Wavelet(_) => Method::Dwt,
        }
    }

    fn codec(&self) -> &dyn StegoCodec {
        match self {
            Strategy::Frequency(codec) => codec,
            Strategy::Coefficient(codec) => codec,
            Strategy::Wavelet(codec) => codec,
        }
    }
}

impl StegoCodec for Strategy {
    fn name(&self) -> &'static str {
        self.codec().name()
    }

    fn capacity(&self, len: usize) -> usize {
        self.codec().capacity(len)
    }

    fn embed(&self, samples: &[f64], message: &str) -> Result<Vec<f64>> {
        self.codec().embed(samples, message)
    }

    fn extract(&self, samples: &[f64]) -> Extraction {
        self.codec().extract(samples)
    }
}

/// Deterministic three-tone test channel with peak below 1.0
#[cfg(test)]
pub(crate) fn test_tone(len: usize) -> Vec<f64> {
    use std::f64::consts::PI;

    (0..len)
        .map(|n| {
            let t = n as f64 / 44_100.0;
            0.45 * (2.0 * PI * 440.0 * t).sin()
                + 0.25 * (2.0 * PI * 1_250.0 * t).sin()
                + 0.1 * (2.0 * PI * 3_100.0 * t).cos()
        })
        .collect()
}
