//! # winlz LZFU
//!
//! Pure Rust decoder for compressed RTF ([MS-OXRTFCP]), the format Outlook
//! uses for the `PR_RTF_COMPRESSED` property of messages in PST/MSG files.
//!
//! ## Format
//!
//! - 16-byte header: sizes, `LZFu`/`MELA` magic, CRC-32 of the body
//! - `MELA` bodies are stored RTF
//! - `LZFu` bodies reference a 4096-byte ring dictionary pre-seeded with
//!   common RTF control words ([`DICTIONARY_PREFIX`])
//!
//! The header CRC is checked but advisory: [`decompress_with_header`]
//! reports a mismatch instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use winlz_lzfu::{MAGIC_UNCOMPRESSED, decompress};
//!
//! let mut blob = Vec::new();
//! blob.extend_from_slice(&14u32.to_le_bytes());
//! blob.extend_from_slice(&2u32.to_le_bytes());
//! blob.extend_from_slice(&MAGIC_UNCOMPRESSED.to_le_bytes());
//! blob.extend_from_slice(&0u32.to_le_bytes());
//! blob.extend_from_slice(b"XY");
//!
//! assert_eq!(decompress(&blob, 64).unwrap(), b"XY");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod header;

pub use decode::{DICTIONARY_PREFIX, LzfuOutput, body_crc, decompress, decompress_with_header};
pub use header::{Compression, HEADER_SIZE, LzfuHeader, MAGIC_COMPRESSED, MAGIC_UNCOMPRESSED};

use winlz_core::error::Result;
use winlz_core::format::Format;
use winlz_core::traits::Decoder;

/// LZFU implementation of the [`Decoder`] contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzfuDecoder;

impl LzfuDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for LzfuDecoder {
    fn format(&self) -> Format {
        Format::Lzfu
    }

    fn decode(&self, input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
        decompress(input, max_output_size)
    }
}
