//! LZXPRESS Huffman decompression.
//!
//! The input is a run of blocks. Each block starts with a 256-byte table of
//! 512 packed 4-bit code lengths followed by a bit stream of canonical
//! Huffman codes, and produces up to 64 KiB of output.
//!
//! ## Symbols
//!
//! - `0..=255`: literal bytes
//! - `256..=511`: matches, `symbol - 256 = (offset_bits << 4) | length_header`
//!
//! A `length_header` of 15 is extended by bytes taken from the byte cursor
//! of the bit stream; the offset is `(1 << offset_bits) | next offset_bits
//! bits`. Symbol 256 decoded once the input has been fully loaded marks the
//! end of the stream.

use winlz_core::bitstream::BitReader;
use winlz_core::error::{DecodeError, Result};
use winlz_core::sink::BoundedOutput;

use crate::extend_length;

/// Number of symbols in the alphabet.
pub const SYMBOL_COUNT: usize = 512;

/// Size of the packed code length table at the start of each block.
pub const TABLE_BYTES: usize = SYMBOL_COUNT / 2;

/// Output bytes produced per block.
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Longest code length, also the width of the decode table index.
const MAX_CODE_LENGTH: u32 = 15;

/// Entries in the direct decode table.
const DECODE_TABLE_SIZE: usize = 1 << MAX_CODE_LENGTH;

/// First match symbol; also the end-of-stream symbol.
const END_OF_STREAM: u16 = 256;

/// Minimum match length.
const MIN_MATCH: usize = 3;

/// Length header that escapes to an extra byte.
const LENGTH_HEADER_ESCAPE: usize = 15;

/// Byte value that escapes to an explicit 16/32-bit length.
const BYTE_ESCAPE: usize = 255;

/// Canonical Huffman decode table for one block.
///
/// Every 15-bit prefix of the bit stream maps directly to a symbol, so a
/// lookup is a single peek plus an index.
#[derive(Debug, Clone)]
pub struct HuffmanTable {
    /// Symbol for each 15-bit prefix.
    entries: Box<[u16]>,
    /// Code length per symbol (0 = unused).
    lengths: [u8; SYMBOL_COUNT],
}

impl HuffmanTable {
    /// Build a table from the 256-byte packed representation.
    ///
    /// Fails with [`DecodeError::HuffmanTableInvalid`] when the lengths
    /// over- or under-subscribe the code space.
    pub fn from_packed(packed: &[u8; TABLE_BYTES]) -> Result<Self> {
        let mut lengths = [0u8; SYMBOL_COUNT];
        for (i, &byte) in packed.iter().enumerate() {
            lengths[2 * i] = byte & 0x0F;
            lengths[2 * i + 1] = byte >> 4;
        }
        Self::from_lengths(&lengths)
    }

    /// Build a table from one code length per symbol.
    pub fn from_lengths(lengths: &[u8; SYMBOL_COUNT]) -> Result<Self> {
        let mut entries = vec![0u16; DECODE_TABLE_SIZE].into_boxed_slice();
        let mut filled = 0usize;

        for len in 1..=MAX_CODE_LENGTH {
            let span = 1usize << (MAX_CODE_LENGTH - len);
            for (symbol, _) in lengths
                .iter()
                .enumerate()
                .filter(|&(_, &l)| u32::from(l) == len)
            {
                if filled + span > DECODE_TABLE_SIZE {
                    return Err(DecodeError::huffman_table(format!(
                        "code space over-subscribed at symbol {symbol} (length {len})"
                    )));
                }
                entries[filled..filled + span].fill(symbol as u16);
                filled += span;
            }
        }

        if filled != DECODE_TABLE_SIZE {
            return Err(DecodeError::huffman_table(format!(
                "code space under-subscribed ({filled} of {DECODE_TABLE_SIZE} entries)"
            )));
        }

        tracing::trace!(
            used = lengths.iter().filter(|&&l| l != 0).count(),
            "lzxpress huffman table built"
        );

        Ok(Self {
            entries,
            lengths: *lengths,
        })
    }

    /// Code length assigned to `symbol`.
    pub fn code_length(&self, symbol: u16) -> u8 {
        self.lengths[symbol as usize]
    }

    /// Decode one symbol from `reader`.
    #[inline]
    pub fn decode(&self, reader: &mut BitReader<'_>) -> Result<u16> {
        let symbol = self.entries[reader.peek(MAX_CODE_LENGTH) as usize];
        reader.consume(u32::from(self.code_length(symbol)))?;
        Ok(symbol)
    }
}

/// How a block finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEnd {
    /// 64 KiB produced; another block may follow at the given input offset.
    Continue(usize),
    /// End-of-stream symbol or output limit reached.
    Done,
}

/// Decompress an LZXPRESS Huffman stream, producing at most
/// `max_output_size` bytes.
///
/// Callers normally pass the artifact's declared uncompressed size: the
/// format relies on it as a stop condition.
pub fn decompress(input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
    let mut output = BoundedOutput::with_capacity(max_output_size, input.len().saturating_mul(4));
    let mut position = 0usize;

    while position < input.len() && !output.is_full() {
        match decompress_block(input, position, &mut output)? {
            BlockEnd::Continue(next) => position = next,
            BlockEnd::Done => break,
        }
    }

    Ok(output.into_inner())
}

/// Decode one block whose table starts at `start`.
fn decompress_block(input: &[u8], start: usize, output: &mut BoundedOutput) -> Result<BlockEnd> {
    let packed: &[u8; TABLE_BYTES] = input
        .get(start..start + TABLE_BYTES)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| DecodeError::truncated(start, start + TABLE_BYTES - input.len()))?;
    let table = HuffmanTable::from_packed(packed)?;

    let mut reader = BitReader::new(input, start + TABLE_BYTES);
    let block_start = output.len();
    let block_end = block_start + BLOCK_SIZE;

    tracing::debug!(offset = start, output = block_start, "lzxpress huffman block");

    while output.len() < block_end {
        if output.is_full() {
            return Ok(BlockEnd::Done);
        }

        let symbol = table.decode(&mut reader)?;
        if symbol < END_OF_STREAM {
            output.push(symbol as u8)?;
            continue;
        }
        if symbol == END_OF_STREAM && reader.is_exhausted() {
            return Ok(BlockEnd::Done);
        }

        let symbol = (symbol - END_OF_STREAM) as usize;
        let offset_bits = (symbol >> 4) as u32;
        let mut length = symbol & 0x0F;

        if length == LENGTH_HEADER_ESCAPE {
            let token_at = reader.position();
            length = reader.read_u8()? as usize;
            if length == BYTE_ESCAPE {
                let at = reader.position();
                length = reader.read_u16_le()? as usize;
                if length == 0 {
                    length = reader.read_u32_le()? as usize;
                }
                if length < LENGTH_HEADER_ESCAPE {
                    return Err(DecodeError::corrupted(
                        at,
                        format!("explicit match length {length} below {LENGTH_HEADER_ESCAPE}"),
                    ));
                }
                length -= LENGTH_HEADER_ESCAPE;
            }
            length = extend_length(length, LENGTH_HEADER_ESCAPE + MIN_MATCH, token_at)?;
        } else {
            length += MIN_MATCH;
        }

        let offset = (1usize << offset_bits) | reader.read_bits(offset_bits)? as usize;
        output.copy_match(offset, length)?;
    }

    Ok(BlockEnd::Continue(reader.position()))
}
