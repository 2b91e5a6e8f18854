//! Fixed-width text <-> bit conversion
//!
//! Every character is carried as its 8-bit code point, most significant bit first.

use crate::error::{Result, StegoError};
use std::fmt;
use std::str::FromStr;

/// Ordered sequence of bits
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append the 8 bits of `byte`, MSB first
    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.bits.push((byte >> shift) & 1 == 1);
        }
    }

    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Pack complete 8-bit groups into bytes; a trailing remainder is ignored
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks_exact(8)
            .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }

    /// First `max_bits` bits as text, for log lines
    pub fn preview(&self, max_bits: usize) -> String {
        self.bits
            .iter()
            .take(max_bits)
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview(self.bits.len()))
    }
}

impl FromStr for BitString {
    type Err = StegoError;

    /// Parse a string of `0`/`1` characters
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(StegoError::Encoding { ch, position }),
            })
            .collect()
    }
}

/// Convert text to bits, 8 per character, MSB first
///
/// Characters above U+00FF are rejected rather than truncated.
pub fn text_to_binary(text: &str) -> Result<BitString> {
    let mut bits = BitString::with_capacity(text.len() * 8);

    for (position, ch) in text.chars().enumerate() {
        let code = u8::try_from(u32::from(ch)).map_err(|_| StegoError::Encoding { ch, position })?;
        bits.push_byte(code);
    }

    Ok(bits)
}

/// Convert bits back to text
///
/// A trailing remainder shorter than 8 bits is dropped without error.
pub fn binary_to_text(bits: &BitString) -> String {
    bits.to_bytes().into_iter().map(char::from).collect()
}

/// Like [`binary_to_text`], but a non byte-aligned input is an error
pub fn binary_to_text_strict(bits: &BitString) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::Alignment { len: bits.len() });
    }
    Ok(binary_to_text(bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_binary_msb_first() {
        let bits = text_to_binary("Hi").unwrap();
        assert_eq!(bits.to_string(), "0100100001101001");
    }

    #[test]
    fn test_latin1_round_trip() {
        let text = "caf\u{e9} \u{ff}\u{0}";
        let bits = text_to_binary(text).unwrap();
        assert_eq!(bits.len(), 8 * text.chars().count());
        assert_eq!(binary_to_text(&bits), text);
    }

    #[test]
    fn test_text_to_binary_rejects_wide_char() {
        let err = text_to_binary("ab€").unwrap_err();
        assert!(matches!(err, StegoError::Encoding { ch: '€', position: 2 }));
    }

    #[test]
    fn test_binary_to_text_drops_remainder() {
        // 'A' followed by two stray bits
        let bits: BitString = "0100000111".parse().unwrap();
        assert_eq!(binary_to_text(&bits), "A");
    }

    #[test]
    fn test_binary_to_text_strict_alignment() {
        let bits: BitString = "0100000111".parse().unwrap();
        let err = binary_to_text_strict(&bits).unwrap_err();
        assert!(matches!(err, StegoError::Alignment { len: 10 }));

        let bits: BitString = "01000001".parse().unwrap();
        assert_eq!(binary_to_text_strict(&bits).unwrap(), "A");
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        assert!("0102".parse::<BitString>().is_err());
        assert!("".parse::<BitString>().unwrap().is_empty());
    }
}
