//! End-of-message marker
//!
//! Every frame ends with `1111111111111110`. Extraction pushes decoded bits
//! through a [`MarkerScanner`] and stops on the first match. Matches are only
//! accepted where the payload in front of the marker is a whole number of
//! bytes, so marker-like runs straddling two characters never cut a message
//! short.

use super::bits::BitString;

/// Marker bit pattern, MSB first
pub const END_MARKER: u16 = 0b1111_1111_1111_1110;

/// Marker length in bits
pub const MARKER_LEN: usize = 16;

/// Streaming marker detector
#[derive(Debug, Clone, Default)]
pub struct MarkerScanner {
    /// Last 16 bits pushed, newest in the low bit
    window: u16,
    count: usize,
}

impl MarkerScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one bit; returns `true` when the bits seen so far end with the marker
    #[inline]
    pub fn push(&mut self, bit: bool) -> bool {
        self.window = (self.window << 1) | bit as u16;
        self.count += 1;

        self.count >= MARKER_LEN
            && (self.count - MARKER_LEN) % 8 == 0
            && self.window == END_MARKER
    }

    /// Payload length in front of the marker once [`push`](Self::push) returned `true`
    pub fn payload_len(&self) -> usize {
        self.count.saturating_sub(MARKER_LEN)
    }
}

/// Return a copy of `bits` with the end marker appended
pub fn append_marker(bits: &BitString) -> BitString {
    let mut framed = BitString::with_capacity(bits.len() + MARKER_LEN);
    framed.extend_from(bits);
    for shift in (0..MARKER_LEN).rev() {
        framed.push((END_MARKER >> shift) & 1 == 1);
    }
    framed
}

/// Index where the first marker starts, i.e. the payload length in front of it
pub fn find_marker(bits: &BitString) -> Option<usize> {
    let mut scanner = MarkerScanner::new();
    bits.iter()
        .any(|bit| scanner.push(bit))
        .then(|| scanner.payload_len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_marker() {
        let bits: BitString = "1010".parse().unwrap();
        assert_eq!(append_marker(&bits).to_string(), "10101111111111111110");
    }

    #[test]
    fn test_find_marker_after_bytes() {
        let bits: BitString = "01001000011010011111111111111110".parse().unwrap();
        assert_eq!(find_marker(&bits), Some(16));
    }

    #[test]
    fn test_find_marker_after_long_run_of_ones() {
        // 0xFF payload: the run of ones spills into the marker
        let bits: BitString = "111111111111111111111110".parse().unwrap();
        assert_eq!(find_marker(&bits), Some(8));
    }

    #[test]
    fn test_find_marker_ignores_unaligned_match() {
        let bits: BitString = "0111111111111111000000001111111111111110".parse().unwrap();
        assert_eq!(find_marker(&bits), Some(24));
    }

    #[test]
    fn test_find_marker_missing() {
        let bits: BitString = "1111111111111111".parse().unwrap();
        assert_eq!(find_marker(&bits), None);
        assert_eq!(find_marker(&BitString::new()), None);
    }

    #[test]
    fn test_scanner_stops_early() {
        let mut scanner = MarkerScanner::new();
        let framed: BitString = "000000001111111111111110".parse().unwrap();
        let hit = framed.iter().position(|bit| scanner.push(bit));
        assert_eq!(hit, Some(23));
        assert_eq!(scanner.payload_len(), 8);
    }
}
