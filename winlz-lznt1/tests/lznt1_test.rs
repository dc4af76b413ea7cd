//! LZNT1 integration tests.

use proptest::prelude::*;
use winlz_core::{DecodeError, Decoder};
use winlz_lznt1::{Chunks, Lznt1Decoder, decompress};

/// Header flag for a compressed chunk with the usual signature.
const HEADER_COMPRESSED: u16 = 0xB000;
/// Header flag for a stored chunk with the usual signature.
const HEADER_STORED: u16 = 0x3000;

fn chunk(flags: u16, body: &[u8]) -> Vec<u8> {
    let header = flags | (body.len() as u16 - 1);
    let mut out = header.to_le_bytes().to_vec();
    out.extend_from_slice(body);
    out
}

#[test]
fn test_literal_chunk_with_terminator() {
    let input = [0x03, 0x00, 0x41, 0x42, 0x43, 0x44, 0x00, 0x00];
    assert_eq!(decompress(&input, 64).unwrap(), b"ABCD");
}

#[test]
fn test_overlap_copy_repeats_last_byte() {
    let input = chunk(HEADER_COMPRESSED, &[0x02, b'A', 0x02, 0x00]);
    assert_eq!(decompress(&input, 64).unwrap(), b"AAAAAA");
}

#[test]
fn test_split_at_position_sixteen() {
    // 16 literals, then a pair at position 16 still using 4 offset bits.
    let mut body = vec![0x00];
    body.extend_from_slice(b"ABCDEFGH");
    body.push(0x00);
    body.extend_from_slice(b"IJKLMNOP");
    body.push(0x01);
    body.extend_from_slice(&0xF000u16.to_le_bytes()); // offset 16, length 3

    let output = decompress(&chunk(HEADER_COMPRESSED, &body), 64).unwrap();
    assert_eq!(output, b"ABCDEFGHIJKLMNOPABC");
}

#[test]
fn test_split_at_position_seventeen() {
    // 17 literals, then a pair at position 17 using 5 offset bits.
    let mut body = vec![0x00];
    body.extend_from_slice(b"ABCDEFGH");
    body.push(0x00);
    body.extend_from_slice(b"IJKLMNOP");
    body.push(0x02);
    body.push(b'Q');
    body.extend_from_slice(&0x8000u16.to_le_bytes()); // offset 17, length 3

    let output = decompress(&chunk(HEADER_COMPRESSED, &body), 64).unwrap();
    assert_eq!(output, b"ABCDEFGHIJKLMNOPQABC");
}

#[test]
fn test_multiple_chunks_concatenate() {
    let mut input = chunk(HEADER_STORED, b"ABCD");
    input.extend(chunk(
        HEADER_COMPRESSED,
        &[
            0x00, b'H', b'e', b'l', b'l', b'o', b' ', b'w', b'o', 0x00, b'r', b'l', b'd',
        ],
    ));
    input.extend_from_slice(&[0x00, 0x00]);

    assert_eq!(decompress(&input, 64).unwrap(), b"ABCDHello world");
}

#[test]
fn test_full_stored_chunk() {
    let data: Vec<u8> = (0..4096).map(|i| (i % 251) as u8).collect();
    let input = chunk(HEADER_STORED, &data);
    assert_eq!(decompress(&input, 8192).unwrap(), data);
}

#[test]
fn test_backreference_into_previous_chunk_rejected() {
    let mut input = chunk(HEADER_STORED, b"ABCD");
    // Literal 'E', then offset 2 which would reach back into "ABCD".
    input.extend(chunk(HEADER_COMPRESSED, &[0x02, b'E', 0x00, 0x10]));

    let err = decompress(&input, 64).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidBackreference { .. }));
}

#[test]
fn test_truncated_body() {
    // Header declares 10 bytes, only 3 follow.
    let input = [0x09, 0x30, b'a', b'b', b'c'];
    let err = decompress(&input, 64).unwrap_err();
    assert_eq!(
        err,
        DecodeError::TruncatedInput {
            offset: 2,
            needed: 7
        }
    );
}

#[test]
fn test_truncated_header() {
    let input = [0x00, 0x30, b'a', 0x05];
    let err = decompress(&input, 64).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedInput { offset: 3, .. }));
}

#[test]
fn test_output_limit_enforced() {
    let input = chunk(HEADER_STORED, b"ABCD");
    let err = decompress(&input, 3).unwrap_err();
    assert_eq!(err, DecodeError::OutputSizeExceeded { limit: 3 });
}

#[test]
fn test_long_run_limit_enforced() {
    // 'A' followed by a maximal run (length 4098 at position 1).
    let input = chunk(HEADER_COMPRESSED, &[0x02, b'A', 0xFF, 0x0F]);
    let err = decompress(&input, 100_000).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidBackreference { .. }));

    // Length 4095 fits the chunk exactly but not a small limit.
    let input = chunk(HEADER_COMPRESSED, &[0x02, b'A', 0xFC, 0x0F]);
    assert_eq!(decompress(&input, 8192).unwrap().len(), 4096);
    let err = decompress(&input, 100).unwrap_err();
    assert_eq!(err, DecodeError::OutputSizeExceeded { limit: 100 });
}

#[test]
fn test_empty_input() {
    assert!(decompress(&[], 16).unwrap().is_empty());
}

#[test]
fn test_chunks_report_layout() {
    let mut input = chunk(HEADER_STORED, b"xyz");
    input.extend(chunk(HEADER_COMPRESSED, &[0x00, b'q']));

    let chunks: Vec<_> = Chunks::new(&input)
        .collect::<Result<_, _>>()
        .expect("chunk walk failed");
    assert_eq!(chunks.len(), 2);
    assert!(!chunks[0].header.compressed);
    assert_eq!(chunks[1].offset, 5);
    assert!(chunks[1].header.compressed);
    assert_eq!(chunks[1].header.size, 2);
}

#[test]
fn test_decoder_is_deterministic() {
    let input = chunk(HEADER_COMPRESSED, &[0x02, b'z', 0x05, 0x00]);
    let decoder = Lznt1Decoder::new();
    let first = decoder.decode(&input, 64);
    let second = decoder.decode(&input, 64);
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn prop_never_exceeds_limit(input in proptest::collection::vec(any::<u8>(), 0..512), limit in 0usize..2048) {
        if let Ok(output) = decompress(&input, limit) {
            prop_assert!(output.len() <= limit);
        }
    }

    #[test]
    fn prop_stored_chunks_round_trip(data in proptest::collection::vec(any::<u8>(), 1..=4096)) {
        let input = chunk(HEADER_STORED, &data);
        prop_assert_eq!(decompress(&input, 4096).unwrap(), data);
    }
}
