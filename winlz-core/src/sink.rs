//! Bounded output sink shared by the linear-window decoders.
//!
//! LZNT1 and both LZXPRESS variants use the already-produced output as their
//! sliding window. [`BoundedOutput`] owns that output and enforces two rules
//! on every write:
//!
//! - the total length never exceeds the caller's limit (checked before any
//!   byte of a token is written, so a rejected token leaves no trace);
//! - a back-reference only reads positions that have already been written.
//!
//! Copies where `offset < length` are legal and reproduce a repeating
//! pattern, so overlapping copies proceed byte by byte.

use crate::error::{DecodeError, Result};
use crate::token::Token;

/// Upper bound on the capacity reserved up front from a size hint.
const MAX_INITIAL_RESERVE: usize = 1 << 20;

/// A growable output buffer with a hard size ceiling.
#[derive(Debug, Clone)]
pub struct BoundedOutput {
    /// Bytes produced so far.
    data: Vec<u8>,
    /// Maximum number of bytes that may be produced.
    limit: usize,
}

impl BoundedOutput {
    /// Create an empty sink that accepts at most `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Create a sink with some capacity reserved from a size hint.
    ///
    /// The reservation is clamped to the limit and to 1 MiB so that a forged
    /// size field cannot force a large allocation before any byte decodes.
    pub fn with_capacity(limit: usize, hint: usize) -> Self {
        let reserve = hint.min(limit).min(MAX_INITIAL_RESERVE);
        Self {
            data: Vec::with_capacity(reserve),
            limit,
        }
    }

    /// Number of bytes produced so far (the write cursor).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been produced yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The maximum output size.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of bytes that may still be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.data.len()
    }

    /// Check if the sink has reached its limit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.limit
    }

    #[inline]
    fn reserve_checked(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(DecodeError::output_exceeded(self.limit));
        }
        Ok(())
    }

    /// Write a single literal byte.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.reserve_checked(1)?;
        self.data.push(byte);
        Ok(())
    }

    /// Write a run of literal bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve_checked(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Copy `length` bytes from `offset` bytes behind the cursor.
    ///
    /// The whole output is the window.
    #[inline]
    pub fn copy_match(&mut self, offset: usize, length: usize) -> Result<()> {
        self.copy_match_in_window(0, offset, length)
    }

    /// Copy `length` bytes from `offset` bytes behind the cursor, where the
    /// source must not precede `window_start`.
    ///
    /// LZNT1 restricts references to the current chunk, which begins at
    /// `window_start` in the output.
    pub fn copy_match_in_window(
        &mut self,
        window_start: usize,
        offset: usize,
        length: usize,
    ) -> Result<()> {
        let cursor = self.data.len();
        let window_len = cursor.saturating_sub(window_start);

        if offset == 0 || length == 0 || offset > window_len {
            return Err(DecodeError::invalid_backreference(
                offset, length, window_len,
            ));
        }
        self.reserve_checked(length)?;

        let src = cursor - offset;
        if offset == 1 {
            // Run of the previous byte.
            let byte = self.data[src];
            self.data.resize(cursor + length, byte);
        } else if offset >= length {
            self.data.extend_from_within(src..src + length);
        } else {
            for i in 0..length {
                let byte = self.data[src + i];
                self.data.push(byte);
            }
        }

        Ok(())
    }

    /// Apply a decoded token.
    #[inline]
    pub fn apply(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Literal(byte) => self.push(byte),
            Token::Backreference { offset, length } => self.copy_match(offset, length),
        }
    }

    /// Get the output produced so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the sink and return the output.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}
