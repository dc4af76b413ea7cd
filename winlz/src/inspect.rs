//! Structural summaries of compressed inputs, without decoding them.

use winlz_core::error::Result;
use winlz_core::format::Format;
use winlz_lzfu::{LzfuHeader, body_crc};
use winlz_lznt1::Chunks;

/// Chunk statistics of an LZNT1 stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lznt1Summary {
    /// Number of chunks before the terminator.
    pub chunks: usize,
    /// Chunks holding a token stream.
    pub compressed_chunks: usize,
    /// Chunks stored verbatim.
    pub stored_chunks: usize,
    /// Input bytes covered by the chunks, headers included.
    pub stream_len: usize,
    /// Upper bound on the decoded size (4096 per compressed chunk).
    pub max_output_len: usize,
}

/// Header fields of a compressed RTF blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzfuSummary {
    /// The parsed header.
    pub header: LzfuHeader,
    /// CRC computed over the body, when the body is compressed.
    pub computed_crc: Option<u32>,
}

/// What can be learned about an input without decoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// LZNT1 chunk layout.
    Lznt1(Lznt1Summary),
    /// LZFU header.
    Lzfu(LzfuSummary),
    /// LZXPRESS streams have no structure visible before decoding.
    Opaque {
        /// The format the input was declared as.
        format: Format,
        /// Input length.
        input_len: usize,
    },
}

/// Summarize `input` as `format`.
pub fn inspect(format: Format, input: &[u8]) -> Result<Summary> {
    match format {
        Format::Lznt1 => {
            let mut summary = Lznt1Summary::default();
            for chunk in Chunks::new(input) {
                let chunk = chunk?;
                summary.chunks += 1;
                if chunk.header.compressed {
                    summary.compressed_chunks += 1;
                    summary.max_output_len += winlz_lznt1::CHUNK_SIZE;
                } else {
                    summary.stored_chunks += 1;
                    summary.max_output_len += chunk.header.size;
                }
                summary.stream_len = chunk.offset + 2 + chunk.header.size;
            }
            Ok(Summary::Lznt1(summary))
        }
        Format::Lzfu => {
            let header = LzfuHeader::parse(input)?;
            let computed_crc = if header.is_compressed() {
                Some(body_crc(header.body(input)?))
            } else {
                None
            };
            Ok(Summary::Lzfu(LzfuSummary {
                header,
                computed_crc,
            }))
        }
        Format::Xpress | Format::XpressHuffman => Ok(Summary::Opaque {
            format,
            input_len: input.len(),
        }),
    }
}
