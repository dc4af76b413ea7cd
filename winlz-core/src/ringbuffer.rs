//! Ring dictionary for decoders with a pre-seeded window.
//!
//! LZFU addresses its history by absolute slot index rather than by
//! distance, and starts with a constant prefix already in place. The
//! [`RingBuffer`] here models that: every slot always holds defined content
//! (the seed, then zeros), so reads never need an "uninitialized" check.
//!
//! # Sizes
//!
//! - LZFU (compressed RTF): 4 KB (4096 bytes)

use crate::error::{DecodeError, Result};
use crate::sink::BoundedOutput;

/// Common window sizes.
pub mod sizes {
    /// Window size for LZFU compressed RTF (4 KB).
    pub const LZFU: usize = 4096;
}

/// A fixed-capacity circular dictionary addressed by absolute index.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// The underlying buffer; always fully initialized.
    buffer: Vec<u8>,
    /// Current write position (next byte will be written here).
    position: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl RingBuffer {
    /// Create a zero-filled ring buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2 or is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity],
            position: 0,
            mask: capacity - 1,
        }
    }

    /// Create a ring buffer whose first slots hold `seed`.
    ///
    /// The write position is left immediately after the seed (modulo the
    /// capacity). A seed longer than the capacity keeps its last `capacity`
    /// bytes, as if it had been written through the ring.
    pub fn with_seed(capacity: usize, seed: &[u8]) -> Self {
        let mut ring = Self::new(capacity);
        ring.write_bytes(seed);
        ring
    }

    /// Get the current write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read the byte in slot `index` (taken modulo the capacity).
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.buffer[index & self.mask]
    }

    /// Write a single byte at the cursor and advance it.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
    }

    /// Write multiple bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Copy `length` bytes starting at absolute slot `start`.
    ///
    /// Each byte is read after the previous one has been written back at the
    /// cursor, so a copy whose source range overtakes the cursor reads the
    /// bytes it has just produced. Every copied byte also goes to `output`.
    /// The output limit is checked before anything is written.
    pub fn copy_absolute(
        &mut self,
        start: usize,
        length: usize,
        output: &mut BoundedOutput,
    ) -> Result<()> {
        if length > output.remaining() {
            return Err(DecodeError::output_exceeded(output.limit()));
        }

        let mut src = start;
        for _ in 0..length {
            let byte = self.byte_at(src);
            self.write_byte(byte);
            output.push(byte)?;
            src = (src + 1) & self.mask;
        }

        Ok(())
    }
}
