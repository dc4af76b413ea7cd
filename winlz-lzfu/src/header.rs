//! The 16-byte compressed RTF header.
//!
//! ```text
//! offset  size  field
//!      0     4  compressed size (bytes after this field: 12 + body)
//!      4     4  uncompressed size
//!      8     4  magic: "LZFu" compressed, "MELA" uncompressed
//!     12     4  CRC-32 of the body (zero when uncompressed)
//! ```
//!
//! All fields are little-endian.

use winlz_core::error::{DecodeError, Result};

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Header bytes counted by the compressed size field.
const COUNTED_HEADER_BYTES: usize = HEADER_SIZE - 4;

/// Magic for a compressed body (`"LZFu"`).
pub const MAGIC_COMPRESSED: u32 = 0x75465A4C;

/// Magic for an uncompressed body (`"MELA"`).
pub const MAGIC_UNCOMPRESSED: u32 = 0x414C454D;

/// How the body following the header is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// LZFU token stream.
    Compressed,
    /// Raw RTF.
    Uncompressed,
}

impl Compression {
    /// Map a magic value to a storage kind.
    pub fn from_magic(magic: u32) -> Result<Self> {
        match magic {
            MAGIC_COMPRESSED => Ok(Self::Compressed),
            MAGIC_UNCOMPRESSED => Ok(Self::Uncompressed),
            other => Err(DecodeError::unsupported_magic(other)),
        }
    }

    /// Name used in logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compressed => "LZFu",
            Self::Uncompressed => "MELA",
        }
    }
}

/// A parsed compressed RTF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzfuHeader {
    /// Bytes following the size field (12 header bytes plus the body).
    pub compressed_size: u32,
    /// Size of the decoded RTF.
    pub uncompressed_size: u32,
    /// Storage kind named by the magic.
    pub compression: Compression,
    /// CRC-32 of the body as stored.
    pub crc: u32,
}

impl LzfuHeader {
    /// Parse the header at the start of `input`.
    ///
    /// `compressed_size` counts every byte after the field itself: the 12
    /// remaining header bytes plus the body, as stored by Outlook. A value
    /// that counts the body alone is therefore 12 short.
    ///
    /// Fails on short input, an unknown magic, or a compressed size smaller
    /// than the header itself. The body length is checked by [`body`].
    ///
    /// [`body`]: LzfuHeader::body
    pub fn parse(input: &[u8]) -> Result<Self> {
        if input.len() < HEADER_SIZE {
            return Err(DecodeError::truncated(
                input.len(),
                HEADER_SIZE - input.len(),
            ));
        }

        let field = |at: usize| {
            u32::from_le_bytes([input[at], input[at + 1], input[at + 2], input[at + 3]])
        };
        let compressed_size = field(0);
        let compression = Compression::from_magic(field(8))?;

        if (compressed_size as usize) < COUNTED_HEADER_BYTES {
            return Err(DecodeError::corrupted(
                0,
                format!("compressed size {compressed_size} smaller than the header"),
            ));
        }

        Ok(Self {
            compressed_size,
            uncompressed_size: field(4),
            compression,
            crc: field(12),
        })
    }

    /// Length of the body in bytes.
    pub fn body_len(&self) -> usize {
        self.compressed_size as usize - COUNTED_HEADER_BYTES
    }

    /// The body slice of `input` described by this header.
    pub fn body<'a>(&self, input: &'a [u8]) -> Result<&'a [u8]> {
        let end = HEADER_SIZE + self.body_len();
        input
            .get(HEADER_SIZE..end)
            .ok_or_else(|| DecodeError::truncated(input.len(), end - input.len()))
    }

    /// Check if the body is an LZFU token stream.
    pub fn is_compressed(&self) -> bool {
        self.compression == Compression::Compressed
    }
}
