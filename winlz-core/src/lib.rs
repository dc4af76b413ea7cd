//! # winlz Core
//!
//! Core components for the winlz decoder suite.
//!
//! This crate provides the building blocks the codec crates share:
//!
//! - [`sink`]: Bounded output buffer with overlap-safe back-reference copies
//! - [`ringbuffer`]: Pre-seeded ring dictionary addressed by absolute index
//! - [`bitstream`]: MSB-first reader over 16-bit little-endian words
//! - [`crc`]: CRC-32 (ISO 3309 and raw-register forms)
//! - [`token`]: The transient literal/back-reference token
//! - [`traits`]: The [`Decoder`] contract and [`DecodeOptions`]
//! - [`format`]: Format tags used to select a decoder
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Facade / CLI                                            │
//! │     winlz (format dispatch, detection), winlz-cli       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codecs                                                  │
//! │     LZNT1, LZXPRESS plain, LZXPRESS Huffman, LZFU       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BoundedOutput, RingBuffer, BitReader, CRC, errors   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use winlz_core::sink::BoundedOutput;
//! use winlz_core::crc::Crc32;
//!
//! let mut out = BoundedOutput::new(16);
//! out.extend_from_slice(b"ab").unwrap();
//! out.copy_match(2, 4).unwrap();
//! assert_eq!(out.as_slice(), b"ababab");
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod crc;
pub mod error;
pub mod format;
pub mod ringbuffer;
pub mod sink;
pub mod token;
pub mod traits;

// Re-exports for convenience
pub use bitstream::BitReader;
pub use crc::Crc32;
pub use error::{DecodeError, Result};
pub use format::{Format, UnknownFormat};
pub use ringbuffer::RingBuffer;
pub use sink::BoundedOutput;
pub use token::Token;
pub use traits::{DecodeOptions, Decoder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{DecodeError, Result};
    pub use crate::format::Format;
    pub use crate::sink::BoundedOutput;
    pub use crate::token::Token;
    pub use crate::traits::{DecodeOptions, Decoder};
}
