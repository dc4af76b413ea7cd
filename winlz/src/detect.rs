//! Format sniffing.
//!
//! Only two of the four formats carry anything recognizable:
//!
//! - LZFU: `LZFu` or `MELA` at offset 8
//! - LZNT1: a first chunk header with signature bits `0b011` whose body fits
//!   in the input
//!
//! Plain and Huffman LZXPRESS have no header at all and are never detected;
//! the caller has to know them from context.

use winlz_core::format::Format;
use winlz_lzfu::{HEADER_SIZE, MAGIC_COMPRESSED, MAGIC_UNCOMPRESSED};
use winlz_lznt1::ChunkHeader;

/// Signature bits 12..=14 written by every known LZNT1 compressor.
const LZNT1_SIGNATURE: u8 = 0b011;

/// Guess the format of `input` from its leading bytes.
pub fn detect(input: &[u8]) -> Option<Format> {
    if is_lzfu(input) {
        return Some(Format::Lzfu);
    }
    if is_lznt1(input) {
        return Some(Format::Lznt1);
    }
    None
}

fn is_lzfu(input: &[u8]) -> bool {
    if input.len() < HEADER_SIZE {
        return false;
    }
    let magic = u32::from_le_bytes([input[8], input[9], input[10], input[11]]);
    magic == MAGIC_COMPRESSED || magic == MAGIC_UNCOMPRESSED
}

fn is_lznt1(input: &[u8]) -> bool {
    let &[low, high, ..] = input else {
        return false;
    };
    match ChunkHeader::from_raw(u16::from_le_bytes([low, high])) {
        Some(header) => header.signature == LZNT1_SIGNATURE && 2 + header.size <= input.len(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lzfu() {
        let mut input = vec![0u8; 16];
        input[8..12].copy_from_slice(b"LZFu");
        assert_eq!(detect(&input), Some(Format::Lzfu));

        input[8..12].copy_from_slice(b"MELA");
        assert_eq!(detect(&input), Some(Format::Lzfu));
    }

    #[test]
    fn test_detect_lznt1() {
        assert_eq!(detect(&[0x01, 0x30, b'h', b'i']), Some(Format::Lznt1));
        assert_eq!(detect(&[0x01, 0xB0, 0x00, b'h']), Some(Format::Lznt1));
    }

    #[test]
    fn test_lznt1_body_must_fit() {
        assert_eq!(detect(&[0x05, 0x30, b'h', b'i']), None);
    }

    #[test]
    fn test_wrong_signature() {
        assert_eq!(detect(&[0x01, 0x40, b'h', b'i']), None);
    }

    #[test]
    fn test_xpress_not_detected() {
        assert_eq!(detect(&[0x00, 0x00, 0x00, 0x00, b'H', b'i']), None);
        assert_eq!(detect(&[]), None);
        assert_eq!(detect(&[0x42]), None);
    }
}
