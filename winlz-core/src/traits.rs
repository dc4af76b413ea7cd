//! The shared decode contract.
//!
//! Every codec crate in the workspace implements [`Decoder`] once. The
//! implementations share nothing but this signature and the
//! [`DecodeError`](crate::error::DecodeError) taxonomy; a caller picks one by
//! [`Format`](crate::format::Format).

use crate::error::Result;
use crate::format::Format;

/// A one-shot decompressor for a complete input buffer.
///
/// Implementations are stateless between calls, so a single value may be
/// shared across threads and reused for any number of inputs.
pub trait Decoder: Send + Sync {
    /// The format this decoder reads.
    fn format(&self) -> Format;

    /// Decode `input`, producing at most `max_output_size` bytes.
    ///
    /// Fails instead of returning partial output.
    fn decode(&self, input: &[u8], max_output_size: usize) -> Result<Vec<u8>>;

    /// Decode with the limit taken from `options`.
    fn decode_with(&self, input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
        self.decode(input, options.max_output_size)
    }
}

/// Options shared by all decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of output bytes a single decode may produce.
    pub max_output_size: usize,
}

impl DecodeOptions {
    /// Default output ceiling (256 MiB).
    pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 256 * 1024 * 1024;

    /// Create options with a custom output ceiling.
    pub fn new(max_output_size: usize) -> Self {
        Self { max_output_size }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_OUTPUT_SIZE)
    }
}
