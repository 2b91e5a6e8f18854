//! PyO3 bindings for Python integration

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::error::StegoError;

mod codec_bindings;
mod message_bindings;

impl From<StegoError> for PyErr {
    fn from(err: StegoError) -> Self {
        match err {
            StegoError::Io(_) | StegoError::Audio(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python module definition
#[pymodule]
fn spectral_stego(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<codec_bindings::PyStegoCodec>()?;
    m.add_class::<codec_bindings::PyExtraction>()?;

    m.add_function(wrap_pyfunction!(message_bindings::text_to_binary, m)?)?;
    m.add_function(wrap_pyfunction!(message_bindings::binary_to_text, m)?)?;

    Ok(())
}
