//! # winlz XPRESS
//!
//! Pure Rust decoders for the two LZXPRESS variants described in [MS-XCA]:
//!
//! - **Plain LZ77** ([`plain`]): indicator words select literals or
//!   length/offset matches with a nibble-sharing length escape. Used by ESE
//!   databases and hibernation files.
//! - **Huffman** ([`huffman`]): per-64 KiB blocks of canonical Huffman codes
//!   over a 512-symbol literal/match alphabet. Used by `MAM\x04` prefetch,
//!   WIM resources and SMB compression.
//!
//! Both formats use the produced output as their window, so offsets may
//! reach back across the whole output.
//!
//! ## Example
//!
//! ```rust
//! use winlz_xpress::plain;
//!
//! // One indicator word (all literals) followed by "Hi".
//! let compressed = [0x00, 0x00, 0x00, 0x00, b'H', b'i'];
//! assert_eq!(plain::decompress(&compressed, 16).unwrap(), b"Hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod huffman;
pub mod plain;

pub use huffman::HuffmanTable;

use winlz_core::prelude::*;

/// Add `extra` to a decoded match length, failing instead of wrapping.
///
/// A 32-bit explicit length near `u32::MAX` does not fit once the escape
/// biases are added on targets where `usize` is 32 bits wide.
pub(crate) fn extend_length(length: usize, extra: usize, at: usize) -> Result<usize> {
    length
        .checked_add(extra)
        .ok_or_else(|| {
            DecodeError::corrupted(at, format!("match length {length} + {extra} overflows"))
        })
}

/// Plain LZXPRESS implementation of the [`Decoder`] contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct XpressDecoder;

impl XpressDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for XpressDecoder {
    fn format(&self) -> Format {
        Format::Xpress
    }

    fn decode(&self, input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
        plain::decompress(input, max_output_size)
    }
}

/// LZXPRESS Huffman implementation of the [`Decoder`] contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct XpressHuffmanDecoder;

impl XpressHuffmanDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for XpressHuffmanDecoder {
    fn format(&self) -> Format {
        Format::XpressHuffman
    }

    fn decode(&self, input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
        huffman::decompress(input, max_output_size)
    }
}
