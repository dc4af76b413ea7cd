//! Bit-level input for word-oriented Huffman streams.
//!
//! This module provides a [`BitReader`] over a byte slice whose bits are
//! packed into 16-bit little-endian words and consumed most-significant bit
//! first, with a 32-bit look-ahead register. This is the layout used by the
//! LZXPRESS Huffman format, which also interleaves whole bytes (length
//! escapes) with the bit stream: those bytes are read from the word cursor,
//! i.e. just past the words already loaded into the register.
//!
//! # Truncation
//!
//! Words past the end of the input are loaded as zeros so that a short final
//! code can still be peeked. Consuming any of those padding bits is reported
//! as [`DecodeError::TruncatedInput`].
//!
//! # Example
//!
//! ```
//! use winlz_core::bitstream::BitReader;
//!
//! // Words 0xA5F0, 0x0000 (little-endian on the wire).
//! let data = [0xF0, 0xA5, 0x00, 0x00];
//! let mut reader = BitReader::new(&data, 0);
//! assert_eq!(reader.read_bits(4).unwrap(), 0xA);
//! assert_eq!(reader.read_bits(8).unwrap(), 0x5F);
//! ```

use crate::error::{DecodeError, Result};

/// A most-significant-bit-first reader over 16-bit little-endian words.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// The whole input.
    data: &'a [u8],
    /// Offset of the next word (or escape byte) to load.
    position: usize,
    /// Look-ahead register; the next bit to consume is bit 31.
    bits: u32,
    /// Valid bits in the register beyond the first 16 (may go negative
    /// transiently inside `consume`).
    extra: i32,
    /// Trailing register bits that came from past the end of the input.
    padding: u32,
}

impl<'a> BitReader<'a> {
    /// Create a reader whose first word is at `start`.
    pub fn new(data: &'a [u8], start: usize) -> Self {
        let mut reader = Self {
            data,
            position: start,
            bits: 0,
            extra: 16,
            padding: 0,
        };
        let high = reader.load_word();
        let low = reader.load_word();
        reader.bits = (high << 16) | low;
        reader
    }

    /// Offset of the first input byte not yet loaded into the register.
    ///
    /// A following block (or escape byte) starts here.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if every input byte has been loaded into the register.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Number of register bits that are backed by real input.
    #[inline]
    fn real_bits(&self) -> u32 {
        (16 + self.extra) as u32 - self.padding.min((16 + self.extra) as u32)
    }

    #[inline]
    fn load_word(&mut self) -> u32 {
        let word = match self.data.get(self.position..self.position + 2) {
            Some(bytes) => u16::from_le_bytes([bytes[0], bytes[1]]) as u32,
            None => {
                // A lone trailing byte cannot form a word; its missing high
                // half would be consumed first.
                self.padding += 16;
                0
            }
        };
        self.position += 2;
        word
    }

    /// Peek at the next `count` bits (0-16) without consuming them.
    #[inline]
    pub fn peek(&self, count: u32) -> u32 {
        debug_assert!(count <= 16, "Cannot peek more than 16 bits at once");
        if count == 0 {
            return 0;
        }
        self.bits >> (32 - count)
    }

    /// Consume `count` bits (0-16).
    #[inline]
    pub fn consume(&mut self, count: u32) -> Result<()> {
        debug_assert!(count <= 16, "Cannot consume more than 16 bits at once");
        if count == 0 {
            return Ok(());
        }
        if count > self.real_bits() {
            return Err(DecodeError::truncated(
                self.position.min(self.data.len()),
                count.div_ceil(8) as usize,
            ));
        }

        self.bits <<= count;
        self.extra -= count as i32;
        if self.extra < 0 {
            let word = self.load_word();
            self.bits |= word << (-self.extra) as u32;
            self.extra += 16;
        }

        Ok(())
    }

    /// Read `count` bits (0-16).
    #[inline]
    pub fn read_bits(&mut self, count: u32) -> Result<u32> {
        let value = self.peek(count);
        self.consume(count)?;
        Ok(value)
    }

    /// Read an escape byte from the word cursor.
    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or_else(|| DecodeError::truncated(self.position, 1))?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a little-endian u16 from the word cursor.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self
            .data
            .get(self.position..self.position + 2)
            .ok_or_else(|| DecodeError::truncated(self.position, 2))?;
        self.position += 2;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32 from the word cursor.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self
            .data
            .get(self.position..self.position + 4)
            .ok_or_else(|| DecodeError::truncated(self.position, 4))?;
        self.position += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
