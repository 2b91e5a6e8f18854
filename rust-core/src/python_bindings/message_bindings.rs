//! Python bindings for message framing helpers

use pyo3::prelude::*;

use crate::message::{self, BitString};

/// Convert text to a string of '0'/'1' characters, 8 bits per character
#[pyfunction]
pub fn text_to_binary(text: &str) -> PyResult<String> {
    Ok(message::text_to_binary(text)?.to_string())
}

/// Convert a '0'/'1' string back to text; trailing bits short of a byte are dropped
#[pyfunction]
pub fn binary_to_text(bits: &str) -> PyResult<String> {
    let bits: BitString = bits.parse()?;
    Ok(message::binary_to_text(&bits))
}
