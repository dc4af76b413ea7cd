//! LZ77 token produced transiently by the decoders.

/// A decoded LZ77 token.
///
/// Decoders parse one token at a time from their wire format and hand it to
/// a [`BoundedOutput`](crate::sink::BoundedOutput). Tokens are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single literal byte.
    Literal(u8),
    /// Copy `length` bytes starting `offset` bytes behind the write cursor.
    Backreference {
        /// Distance back from the write cursor (1-based).
        offset: usize,
        /// Number of bytes to copy.
        length: usize,
    },
}
