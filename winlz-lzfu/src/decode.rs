//! LZFU body decoding.
//!
//! The compressed body is a run of control bytes, each followed by up to
//! eight tokens selected by its bits (least significant first):
//!
//! - `0`: a literal byte
//! - `1`: a big-endian 16-bit reference; the high 12 bits are an absolute
//!   slot in a 4096-byte ring dictionary, the low 4 bits `length - 2`
//!
//! The dictionary starts out holding [`DICTIONARY_PREFIX`] with the cursor
//! right after it. A reference to the cursor's own slot ends the stream.

use crate::header::{HEADER_SIZE, LzfuHeader};
use winlz_core::crc::Crc32;
use winlz_core::error::{DecodeError, Result};
use winlz_core::ringbuffer::{RingBuffer, sizes};
use winlz_core::sink::BoundedOutput;

/// Initial dictionary content: common RTF control words.
pub const DICTIONARY_PREFIX: &[u8; 207] = b"{\\rtf1\\ansi\\mac\\deff0\\deftab720{\\fonttbl;}\
{\\f0\\fnil \\froman \\fswiss \\fmodern \\fscript \\fdecor MS Sans SerifSymbolArial\
Times New RomanCourier{\\colortbl\\red0\\green0\\blue0\r\n\\par \
\\pard\\plain\\f0\\fs20\\b\\i\\u\\tab\\tx";

/// Minimum reference length.
const MIN_MATCH: usize = 2;

/// Decoded RTF together with its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzfuOutput {
    /// The parsed header.
    pub header: LzfuHeader,
    /// The decoded RTF bytes.
    pub data: Vec<u8>,
    /// Whether the body matched the header CRC. Uncompressed bodies carry no
    /// CRC and always report `true`.
    pub crc_matches: bool,
}

/// CRC-32 as used by compressed RTF: reflected table, zero initial value,
/// no final XOR.
pub fn body_crc(body: &[u8]) -> u32 {
    Crc32::compute_raw(0, body)
}

/// Decode a compressed RTF blob, producing at most `max_output_size` bytes.
pub fn decompress(input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
    decompress_with_header(input, max_output_size).map(|out| out.data)
}

/// Decode a compressed RTF blob and return the header and CRC status as well.
///
/// A CRC mismatch is logged and reported in [`LzfuOutput::crc_matches`]; it
/// never fails the decode.
pub fn decompress_with_header(input: &[u8], max_output_size: usize) -> Result<LzfuOutput> {
    let header = LzfuHeader::parse(input)?;
    let body = header.body(input)?;
    let raw_size = header.uncompressed_size as usize;

    tracing::debug!(
        compression = header.compression.name(),
        body = body.len(),
        uncompressed = raw_size,
        "lzfu header"
    );

    if !header.is_compressed() {
        if raw_size > body.len() {
            return Err(DecodeError::truncated(
                HEADER_SIZE + body.len(),
                raw_size - body.len(),
            ));
        }
        let mut output = BoundedOutput::new(max_output_size);
        output.extend_from_slice(&body[..raw_size])?;
        return Ok(LzfuOutput {
            header,
            data: output.into_inner(),
            crc_matches: true,
        });
    }

    let crc = body_crc(body);
    let crc_matches = crc == header.crc;
    if !crc_matches {
        tracing::warn!(expected = header.crc, actual = crc, "lzfu crc mismatch");
    }

    let data = decompress_body(body, raw_size, max_output_size)?;
    Ok(LzfuOutput {
        header,
        data,
        crc_matches,
    })
}

/// Decode a compressed body until `raw_size` bytes or the end marker.
fn decompress_body(body: &[u8], raw_size: usize, max_output_size: usize) -> Result<Vec<u8>> {
    let mut dictionary = RingBuffer::with_seed(sizes::LZFU, DICTIONARY_PREFIX);
    let mut output = BoundedOutput::with_capacity(max_output_size, raw_size);
    let mut idx = 0;

    let byte_at = |idx: usize| {
        body.get(idx)
            .copied()
            .ok_or_else(|| DecodeError::truncated(HEADER_SIZE + idx, 1))
    };

    'stream: while output.len() < raw_size {
        let control = byte_at(idx)?;
        idx += 1;

        for bit in 0..8 {
            if output.len() >= raw_size {
                break 'stream;
            }

            if (control >> bit) & 1 == 0 {
                let byte = byte_at(idx)?;
                idx += 1;
                output.push(byte)?;
                dictionary.write_byte(byte);
                continue;
            }

            let high = byte_at(idx)?;
            let low = byte_at(idx + 1)?;
            idx += 2;

            let reference = u16::from_be_bytes([high, low]) as usize;
            let offset = reference >> 4;
            if offset == dictionary.position() {
                tracing::trace!(at = HEADER_SIZE + idx - 2, "lzfu end marker");
                break 'stream;
            }

            // The declared size wins over a reference that runs past it.
            let length = ((reference & 0x0F) + MIN_MATCH).min(raw_size - output.len());
            dictionary.copy_absolute(offset, length, &mut output)?;
        }
    }

    Ok(output.into_inner())
}
