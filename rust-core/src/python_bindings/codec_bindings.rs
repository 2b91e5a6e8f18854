//! Python bindings for the embedding strategies

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::codecs::{Extraction, Method, StegoCodec, Strategy};
use crate::config::StegoConfig;

/// Configured embedding strategy exposed to Python
#[pyclass(name = "StegoCodec")]
pub struct PyStegoCodec {
    strategy: Strategy,
}

#[pymethods]
impl PyStegoCodec {
    /// Create a codec
    ///
    /// Args:
    ///     method: "dft", "dct" or "dwt"
    ///     config_json: Optional JSON overriding codec parameters
    #[new]
    #[pyo3(signature = (method="dwt", config_json=None))]
    fn new(method: &str, config_json: Option<&str>) -> PyResult<Self> {
        let method: Method = method.parse()?;
        let config = match config_json {
            Some(json) => StegoConfig::from_json_str(json)?,
            None => StegoConfig::default(),
        };

        Ok(Self {
            strategy: Strategy::new(method, &config)?,
        })
    }

    /// Embed a message into a mono signal
    ///
    /// Args:
    ///     signal: Channel samples as numpy array
    ///     message: Text to hide
    ///
    /// Returns:
    ///     Modified signal as numpy array
    ///
    /// Raises:
    ///     ValueError: If the message does not fit or cannot be encoded
    fn embed<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
        message: &str,
    ) -> PyResult<&'py PyArray1<f64>> {
        let samples = signal.as_array().to_vec();
        let modified = self.strategy.embed(&samples, message)?;

        Ok(PyArray1::from_vec(py, modified))
    }

    /// Extract a message
    ///
    /// Returns:
    ///     Extraction with the message, or the failure reason and scanned bits
    fn extract(&self, signal: PyReadonlyArray1<f64>) -> PyExtraction {
        let samples = signal.as_array().to_vec();
        PyExtraction::from(self.strategy.extract(&samples))
    }

    /// Number of bit slots a signal of `length` samples offers
    fn capacity(&self, length: usize) -> usize {
        self.strategy.capacity(length)
    }

    /// Method name
    #[getter]
    fn method(&self) -> &'static str {
        self.strategy.method().as_str()
    }

    fn __repr__(&self) -> String {
        format!("StegoCodec(method='{}')", self.strategy.method())
    }
}

/// Extraction outcome exposed to Python
#[pyclass(name = "Extraction")]
pub struct PyExtraction {
    /// Recovered text, None on failure
    #[pyo3(get)]
    message: Option<String>,

    /// Why nothing was recovered, None on success
    #[pyo3(get)]
    reason: Option<String>,

    /// Bits scanned before giving up, as a '0'/'1' string
    #[pyo3(get)]
    bits: String,
}

impl From<Extraction> for PyExtraction {
    fn from(extraction: Extraction) -> Self {
        let failure = extraction.failure();
        Self {
            message: extraction.message().map(str::to_owned),
            reason: failure.map(|f| f.reason.to_string()),
            bits: failure.map(|f| f.bits.to_string()).unwrap_or_default(),
        }
    }
}

#[pymethods]
impl PyExtraction {
    /// Whether a message was recovered
    #[getter]
    fn recovered(&self) -> bool {
        self.message.is_some()
    }

    fn __bool__(&self) -> bool {
        self.message.is_some()
    }

    fn __repr__(&self) -> String {
        match (&self.message, &self.reason) {
            (Some(message), _) => format!("Extraction(message={message:?})"),
            (None, reason) => format!(
                "Extraction(reason={:?}, bits={})",
                reason.as_deref().unwrap_or_default(),
                self.bits.len()
            ),
        }
    }
}
