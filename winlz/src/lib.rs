//! # winlz
//!
//! Pure Rust decoders for the compression formats found in Windows and
//! Office artifacts:
//!
//! | Format | Crate | Found in |
//! |--------|-------|----------|
//! | LZNT1 | [`lznt1`] | NTFS compressed files, `RtlDecompressBuffer` |
//! | LZXPRESS | [`xpress::plain`] | ESE databases, hibernation files |
//! | LZXPRESS Huffman | [`xpress::huffman`] | Windows 10 prefetch, WIM, SMB |
//! | LZFU | [`lzfu`] | Outlook compressed RTF (PST/MSG) |
//!
//! Every decoder takes a complete input buffer and a hard ceiling on the
//! output size, and either returns the whole output or a
//! [`DecodeError`].
//!
//! ## Example
//!
//! ```rust
//! use winlz::{Format, decode, detect};
//!
//! let input = [0x03, 0x00, b'A', b'B', b'C', b'D', 0x00, 0x00];
//! assert_eq!(detect(&input), None); // signature bits are not 0b011
//!
//! let output = decode(Format::Lznt1, &input, 1024).unwrap();
//! assert_eq!(output, b"ABCD");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod detect;
pub mod inspect;

pub use detect::detect;
pub use inspect::{LzfuSummary, Lznt1Summary, Summary, inspect};
pub use winlz_core::{DecodeError, DecodeOptions, Decoder, Format, Result, UnknownFormat};

pub use winlz_lzfu as lzfu;
pub use winlz_lznt1 as lznt1;
pub use winlz_xpress as xpress;

use winlz_lzfu::LzfuDecoder;
use winlz_lznt1::Lznt1Decoder;
use winlz_xpress::{XpressDecoder, XpressHuffmanDecoder};

/// Get the decoder for `format`.
pub fn decoder_for(format: Format) -> Box<dyn Decoder> {
    match format {
        Format::Lznt1 => Box::new(Lznt1Decoder::new()),
        Format::Xpress => Box::new(XpressDecoder::new()),
        Format::XpressHuffman => Box::new(XpressHuffmanDecoder::new()),
        Format::Lzfu => Box::new(LzfuDecoder::new()),
    }
}

/// Decode `input` as `format`, producing at most `max_output_size` bytes.
pub fn decode(format: Format, input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
    decoder_for(format).decode(input, max_output_size)
}

/// Decode `input` as `format` with the limit taken from `options`.
pub fn decode_with(format: Format, input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    decoder_for(format).decode_with(input, options)
}
