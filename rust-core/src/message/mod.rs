//! Message framing: text to bits and the in-band end marker

pub mod bits;
pub mod marker;

pub use bits::{binary_to_text, binary_to_text_strict, text_to_binary, BitString};
pub use marker::{append_marker, find_marker, MarkerScanner, END_MARKER, MARKER_LEN};

use crate::error::{Result, StegoError};

/// Build the bit frame that gets embedded: message bits followed by the end marker.
///
/// Fails with [`StegoError::MarkerCollision`] when the message's own bits would
/// be read back as a marker, since extraction would stop there and truncate.
pub fn frame_message(text: &str) -> Result<BitString> {
    let payload = text_to_binary(text)?;

    if let Some(position) = find_marker(&payload) {
        return Err(StegoError::MarkerCollision { position });
    }

    let framed = append_marker(&payload);
    log::debug!(
        "Framed {} chars into {} bits: {}...",
        text.chars().count(),
        framed.len(),
        framed.preview(50)
    );
    Ok(framed)
}
