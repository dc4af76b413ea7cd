//! LZNT1 decompression.
//!
//! An LZNT1 stream is a run of chunks, each with a 16-bit little-endian
//! header:
//!
//! ```text
//!  15   14..12     11..0
//! ┌───┬─────────┬──────────────┐
//! │ C │signature│ body size - 1│
//! └───┴─────────┴──────────────┘
//! ```
//!
//! `C` set means the body is a token stream; clear means the body is stored.
//! A zero header (or the end of input at a chunk boundary) ends the stream.
//! Every chunk decodes independently into at most 4096 bytes.

use crate::split::{CHUNK_SIZE, split_for_position};
use winlz_core::error::{DecodeError, Result};
use winlz_core::sink::BoundedOutput;

/// Mask for the body size field.
const HEADER_SIZE_MASK: u16 = 0x0FFF;

/// Flag marking a compressed chunk.
const HEADER_COMPRESSED_FLAG: u16 = 0x8000;

/// Number of tokens introduced by one flag byte.
const TAG_GROUP_SIZE: u32 = 8;

/// A parsed chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Size of the chunk body in bytes (1..=4096).
    pub size: usize,
    /// Whether the body is a token stream.
    pub compressed: bool,
    /// Signature bits 12..=14 (normally `0b011`).
    pub signature: u8,
}

impl ChunkHeader {
    /// Parse a raw header; `None` for the zero terminator.
    pub fn from_raw(raw: u16) -> Option<Self> {
        if raw == 0 {
            return None;
        }
        Some(Self {
            size: (raw & HEADER_SIZE_MASK) as usize + 1,
            compressed: raw & HEADER_COMPRESSED_FLAG != 0,
            signature: ((raw >> 12) & 0x7) as u8,
        })
    }
}

/// One chunk located in the input.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    /// Input offset of the chunk header.
    pub offset: usize,
    /// The parsed header.
    pub header: ChunkHeader,
    /// The chunk body.
    pub body: &'a [u8],
}

/// Iterator over the chunks of an LZNT1 stream.
///
/// Yields an error (and then stops) when a header or body is truncated.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    input: &'a [u8],
    position: usize,
    done: bool,
}

impl<'a> Chunks<'a> {
    /// Walk the chunks of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            done: false,
        }
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>> {
        let end = self.input.len();
        let pos = self.position;

        if pos >= end {
            return Ok(None);
        }
        // Some writers terminate with a single zero byte.
        if pos + 1 == end && self.input[pos] == 0 {
            return Ok(None);
        }
        if pos + 2 > end {
            return Err(DecodeError::truncated(pos, pos + 2 - end));
        }

        let raw = u16::from_le_bytes([self.input[pos], self.input[pos + 1]]);
        let Some(header) = ChunkHeader::from_raw(raw) else {
            return Ok(None);
        };

        let body_start = pos + 2;
        let body_end = body_start + header.size;
        if body_end > end {
            return Err(DecodeError::truncated(body_start, body_end - end));
        }

        self.position = body_end;
        Ok(Some(Chunk {
            offset: pos,
            header,
            body: &self.input[body_start..body_end],
        }))
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Decompress an entire LZNT1 stream, producing at most `max_output_size`
/// bytes.
pub fn decompress(input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
    let mut output = BoundedOutput::with_capacity(max_output_size, input.len().saturating_mul(2));

    for chunk in Chunks::new(input) {
        let chunk = chunk?;
        tracing::debug!(
            offset = chunk.offset,
            size = chunk.header.size,
            compressed = chunk.header.compressed,
            "lznt1 chunk"
        );

        if chunk.header.compressed {
            decompress_chunk(chunk.body, chunk.offset + 2, &mut output)?;
        } else {
            output.extend_from_slice(chunk.body)?;
        }
    }

    Ok(output.into_inner())
}

/// Decompress one compressed chunk body into `output`.
///
/// `base` is the input offset of the body, for error reporting.
fn decompress_chunk(body: &[u8], base: usize, output: &mut BoundedOutput) -> Result<()> {
    let chunk_start = output.len();
    let end = body.len();
    let mut idx = 0;

    while idx < end {
        let tag = body[idx];
        idx += 1;

        for bit in 0..TAG_GROUP_SIZE {
            if idx >= end {
                return Ok(());
            }
            let position = output.len() - chunk_start;

            if (tag >> bit) & 1 == 0 {
                if position >= CHUNK_SIZE {
                    return Err(DecodeError::corrupted(
                        base + idx,
                        "chunk decodes past 4096 bytes",
                    ));
                }
                output.push(body[idx])?;
                idx += 1;
            } else {
                if idx + 2 > end {
                    return Err(DecodeError::truncated(base + idx, idx + 2 - end));
                }
                let raw = u16::from_le_bytes([body[idx], body[idx + 1]]);
                idx += 2;

                let (offset, length) = split_for_position(position).decode(raw);
                if position + length > CHUNK_SIZE {
                    return Err(DecodeError::invalid_backreference(offset, length, position));
                }
                output.copy_match_in_window(chunk_start, offset, length)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parse() {
        let header = ChunkHeader::from_raw(0xB00C).unwrap();
        assert_eq!(header.size, 13);
        assert!(header.compressed);
        assert_eq!(header.signature, 0b011);

        let header = ChunkHeader::from_raw(0x3FFF).unwrap();
        assert_eq!(header.size, 4096);
        assert!(!header.compressed);

        assert!(ChunkHeader::from_raw(0).is_none());
    }

    #[test]
    fn test_literal_chunk() {
        let input = [0x03, 0x00, 0x41, 0x42, 0x43, 0x44, 0x00, 0x00];
        assert_eq!(decompress(&input, 1024).unwrap(), b"ABCD");
    }

    #[test]
    fn test_hello_world() {
        let input = [
            0x0c, 0xb0, 0x00, b'H', b'e', b'l', b'l', b'o', b' ', b'w', b'o', 0x00, b'r', b'l',
            b'd',
        ];
        assert_eq!(decompress(&input, 1024).unwrap(), b"Hello world");
    }

    #[test]
    fn test_overlap_copy() {
        // Literal 'A', then offset 1 / length 5.
        let input = [0x03, 0xB0, 0x02, b'A', 0x02, 0x00];
        assert_eq!(decompress(&input, 1024).unwrap(), b"AAAAAA");
    }

    #[test]
    fn test_single_trailing_zero() {
        let input = [0x01, 0x30, b'h', b'i', 0x00];
        assert_eq!(decompress(&input, 1024).unwrap(), b"hi");
    }

    #[test]
    fn test_reference_before_chunk_start() {
        // Pair as the very first token: nothing to copy from.
        let input = [0x02, 0xB0, 0x01, 0x00, 0x00];
        let err = decompress(&input, 1024).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBackreference { .. }));
    }

    #[test]
    fn test_pair_cut_by_chunk_end() {
        let input = [0x02, 0xB0, 0x02, b'A', 0x00];
        let err = decompress(&input, 1024).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedInput { .. }));
    }

    #[test]
    fn test_chunk_iterator() {
        let input = [0x01, 0x30, b'a', b'b', 0x00, 0x30, b'c', 0x00, 0x00];
        let chunks: Vec<_> = Chunks::new(&input).collect::<Result<_>>().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].body, b"ab");
        assert_eq!(chunks[1].offset, 4);
        assert_eq!(chunks[1].body, b"c");
    }
}
