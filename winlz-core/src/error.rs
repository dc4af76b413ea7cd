//! Error types for winlz decode operations.
//!
//! Every decoder in the workspace reports failures through [`DecodeError`].
//! All variants are terminal for the current decode call; there is no
//! partial-success mode.

use thiserror::Error;

/// The error type shared by all winlz decoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended in the middle of a header or token.
    #[error("Truncated input at offset {offset}: {needed} more byte(s) required")]
    TruncatedInput {
        /// Input offset at which the read was attempted.
        offset: usize,
        /// Number of bytes that were required but not available.
        needed: usize,
    },

    /// A back-reference resolved outside the valid window.
    #[error(
        "Invalid back-reference at output position {position}: offset {offset}, length {length}"
    )]
    InvalidBackreference {
        /// Distance (or absolute dictionary offset) of the reference.
        offset: usize,
        /// Number of bytes the reference asked for.
        length: usize,
        /// Output position (window-relative) where the reference was applied.
        position: usize,
    },

    /// The packed code lengths do not describe a complete prefix code.
    #[error("Invalid Huffman table: {reason}")]
    HuffmanTableInvalid {
        /// Description of the defect.
        reason: String,
    },

    /// The header magic is not one of the recognized constants.
    #[error("Unsupported magic: {magic:#010x}")]
    UnsupportedMagic {
        /// The magic value found in the header.
        magic: u32,
    },

    /// Decoding would produce more bytes than the caller allowed.
    #[error("Output size exceeded: limit is {limit} bytes")]
    OutputSizeExceeded {
        /// The caller-supplied maximum output size.
        limit: usize,
    },

    /// A field holds a value the format cannot produce.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Input offset where the corruption was detected.
        offset: usize,
        /// Description of the corruption.
        message: String,
    },
}

/// Result type alias for winlz decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    /// Create a truncated input error.
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::TruncatedInput { offset, needed }
    }

    /// Create an invalid back-reference error.
    pub fn invalid_backreference(offset: usize, length: usize, position: usize) -> Self {
        Self::InvalidBackreference {
            offset,
            length,
            position,
        }
    }

    /// Create an invalid Huffman table error.
    pub fn huffman_table(reason: impl Into<String>) -> Self {
        Self::HuffmanTableInvalid {
            reason: reason.into(),
        }
    }

    /// Create an unsupported magic error.
    pub fn unsupported_magic(magic: u32) -> Self {
        Self::UnsupportedMagic { magic }
    }

    /// Create an output size exceeded error.
    pub fn output_exceeded(limit: usize) -> Self {
        Self::OutputSizeExceeded { limit }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Short stable name of the error kind, used by the CLI's JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TruncatedInput { .. } => "truncated_input",
            Self::InvalidBackreference { .. } => "invalid_backreference",
            Self::HuffmanTableInvalid { .. } => "huffman_table_invalid",
            Self::UnsupportedMagic { .. } => "unsupported_magic",
            Self::OutputSizeExceeded { .. } => "output_size_exceeded",
            Self::CorruptedData { .. } => "corrupted_data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::truncated(12, 2);
        assert!(err.to_string().contains("offset 12"));

        let err = DecodeError::unsupported_magic(0xDEADBEEF);
        assert!(err.to_string().contains("0xdeadbeef"));

        let err = DecodeError::huffman_table("over-subscribed");
        assert!(err.to_string().contains("over-subscribed"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(DecodeError::output_exceeded(10).kind(), "output_size_exceeded");
        assert_eq!(
            DecodeError::invalid_backreference(4, 3, 1).kind(),
            "invalid_backreference"
        );
    }
}
