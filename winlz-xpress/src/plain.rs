//! Plain LZXPRESS (LZ77 + direct encoding) decompression.
//!
//! The stream has no header. Tokens come in groups of 32, each group
//! introduced by a 32-bit little-endian indicator word whose bits are
//! consumed from the most significant end:
//!
//! - `0`: one literal byte
//! - `1`: a 16-bit match word, `offset - 1` in the high 13 bits and a length
//!   code in the low 3 bits
//!
//! Length code 7 escapes into a shared half byte: the first escape reads a
//! fresh byte and uses its low nibble, the next escape uses the high nibble
//! of that same byte. Nibble 15 escapes into a full byte, byte 255 into a
//! 16-bit length, and a 16-bit zero into a 32-bit length.

use winlz_core::error::{DecodeError, Result};
use winlz_core::sink::BoundedOutput;
use winlz_core::token::Token;

use crate::extend_length;

/// Minimum match length.
const MIN_MATCH: usize = 3;

/// Length code that escapes to the shared nibble.
const LENGTH_CODE_ESCAPE: usize = 7;

/// Nibble value that escapes to an extra byte.
const NIBBLE_ESCAPE: usize = 15;

/// Byte value that escapes to an explicit 16/32-bit length.
const BYTE_ESCAPE: usize = 255;

/// Lowest explicit length; smaller ones are representable by the shorter forms.
const MIN_EXPLICIT_LENGTH: usize = NIBBLE_ESCAPE + LENGTH_CODE_ESCAPE;

/// Bits per indicator word.
const INDICATOR_BITS: u32 = 32;

/// Little-endian byte cursor with truncation reporting.
struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self
            .data
            .get(self.position..self.position + N)
            .ok_or_else(|| {
                DecodeError::truncated(self.position, self.position + N - self.data.len())
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.position += N;
        Ok(out)
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    #[inline]
    fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    #[inline]
    fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }
}

/// Decompress a plain LZXPRESS stream, producing at most `max_output_size`
/// bytes.
///
/// Decoding stops cleanly when the input is exhausted at a token boundary
/// (including an indicator bit announcing a match that never comes) or when
/// exactly `max_output_size` bytes have been produced.
pub fn decompress(input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
    let mut cursor = ByteCursor::new(input);
    let mut output = BoundedOutput::with_capacity(max_output_size, input.len().saturating_mul(4));

    let mut indicator = 0u32;
    let mut indicator_bits = 0u32;
    // Position of the byte whose high nibble serves the next length escape.
    let mut shared_nibble: Option<usize> = None;

    loop {
        if cursor.is_exhausted() || output.is_full() {
            break;
        }

        if indicator_bits == 0 {
            indicator = cursor.read_u32_le()?;
            indicator_bits = INDICATOR_BITS;
        }
        indicator_bits -= 1;

        if indicator & (1 << indicator_bits) == 0 {
            let byte = cursor.read_u8()?;
            output.apply(Token::Literal(byte))?;
            continue;
        }

        if cursor.is_exhausted() {
            break;
        }

        let token_at = cursor.position;
        let word = cursor.read_u16_le()? as usize;
        let offset = (word >> 3) + 1;
        let mut length = word & 0x7;

        if length == LENGTH_CODE_ESCAPE {
            length = match shared_nibble.take() {
                Some(at) => (input[at] >> 4) as usize,
                None => {
                    shared_nibble = Some(cursor.position);
                    (cursor.read_u8()? & 0x0F) as usize
                }
            };

            if length == NIBBLE_ESCAPE {
                length = cursor.read_u8()? as usize;

                if length == BYTE_ESCAPE {
                    let at = cursor.position;
                    length = cursor.read_u16_le()? as usize;
                    if length == 0 {
                        length = cursor.read_u32_le()? as usize;
                    }
                    if length < MIN_EXPLICIT_LENGTH {
                        return Err(DecodeError::corrupted(
                            at,
                            format!("explicit match length {length} below {MIN_EXPLICIT_LENGTH}"),
                        ));
                    }
                    length -= MIN_EXPLICIT_LENGTH;
                }
                length = extend_length(length, NIBBLE_ESCAPE, token_at)?;
            }
            length = extend_length(length, LENGTH_CODE_ESCAPE, token_at)?;
        }
        length = extend_length(length, MIN_MATCH, token_at)?;

        output.apply(Token::Backreference { offset, length })?;
    }

    tracing::debug!(
        input = input.len(),
        output = output.len(),
        "lzxpress plain stream decoded"
    );
    Ok(output.into_inner())
}
