//! # winlz LZNT1
//!
//! Pure Rust decoder for LZNT1, the chunked LZ77 format used by NTFS file
//! compression and `RtlDecompressBuffer(COMPRESSION_FORMAT_LZNT1)`.
//!
//! ## Format
//!
//! - Chunks of at most 4096 uncompressed bytes, each with a 16-bit header
//! - Stored chunks are copied verbatim
//! - Compressed chunks interleave flag bytes with literals and 16-bit
//!   back-reference pairs whose offset/length split depends on the position
//!   inside the chunk (see [`split`])
//! - Back-references never reach into a previous chunk
//!
//! ## Example
//!
//! ```rust
//! use winlz_lznt1::decompress;
//!
//! // "Hello world": one compressed chunk of 13 bytes holding 11 literals.
//! let compressed = [
//!     0x0c, 0xb0,
//!     0x00, b'H', b'e', b'l', b'l', b'o', b' ', b'w', b'o',
//!     0x00, b'r', b'l', b'd',
//! ];
//!
//! let output = decompress(&compressed, 1024).unwrap();
//! assert_eq!(output, b"Hello world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod split;

pub use decode::{Chunk, ChunkHeader, Chunks, decompress};
pub use split::{CHUNK_SIZE, Split, split_for_position};

use winlz_core::error::Result;
use winlz_core::format::Format;
use winlz_core::traits::Decoder;

/// LZNT1 implementation of the [`Decoder`] contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lznt1Decoder;

impl Lznt1Decoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Lznt1Decoder {
    fn format(&self) -> Format {
        Format::Lznt1
    }

    fn decode(&self, input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
        decompress(input, max_output_size)
    }
}
