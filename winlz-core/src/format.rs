//! Format tags for selecting a decoder.

use std::fmt;
use std::str::FromStr;

/// The compression formats winlz can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// LZNT1 (NTFS compressed streams, `RtlDecompressBuffer` format 2).
    Lznt1,
    /// LZXPRESS plain LZ77 ("Xpress", format 3).
    Xpress,
    /// LZXPRESS Huffman ("Xpress Huffman", format 4).
    XpressHuffman,
    /// LZFU compressed RTF (Outlook `PR_RTF_COMPRESSED`).
    Lzfu,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Format; 4] = [
        Format::Lznt1,
        Format::Xpress,
        Format::XpressHuffman,
        Format::Lzfu,
    ];

    /// Short machine-friendly name, accepted back by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lznt1 => "lznt1",
            Self::Xpress => "xpress",
            Self::XpressHuffman => "xpress-huffman",
            Self::Lzfu => "lzfu",
        }
    }

    /// Check if the format carries its own header with a declared size.
    pub fn is_self_describing(&self) -> bool {
        matches!(self, Self::Lzfu)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lznt1 => write!(f, "LZNT1"),
            Self::Xpress => write!(f, "LZXPRESS"),
            Self::XpressHuffman => write!(f, "LZXPRESS Huffman"),
            Self::Lzfu => write!(f, "LZFU"),
        }
    }
}

/// Error returned when a format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lznt1" => Ok(Self::Lznt1),
            "xpress" | "lzxpress" | "lz77" => Ok(Self::Xpress),
            "xpress-huffman" | "lzxpress-huffman" | "xpress_huff" => Ok(Self::XpressHuffman),
            "lzfu" | "rtf" => Ok(Self::Lzfu),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
