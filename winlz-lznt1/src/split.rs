//! Position-dependent offset/length split for LZNT1 back-references.
//!
//! An LZNT1 pair is a 16-bit word whose boundary between the offset field
//! (high bits) and the length field (low bits) moves as the chunk fills up:
//! early in a chunk offsets are short and lengths long, and the offset field
//! gains a bit every time the position doubles past 16.

/// Maximum uncompressed size of one chunk.
pub const CHUNK_SIZE: usize = 4096;

/// Minimum match length; the length field stores `length - 3`.
pub const MIN_MATCH: usize = 3;

/// `(position upper bound, offset_bits, length_bits)`, upper bound inclusive.
const SPLIT_TABLE: [(usize, u32, u32); 9] = [
    (16, 4, 12),
    (32, 5, 11),
    (64, 6, 10),
    (128, 7, 9),
    (256, 8, 8),
    (512, 9, 7),
    (1024, 10, 6),
    (2048, 11, 5),
    (4096, 12, 4),
];

/// Field widths of a pair at a given chunk position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Width of the offset field (high bits).
    pub offset_bits: u32,
    /// Width of the length field (low bits).
    pub length_bits: u32,
}

impl Split {
    /// Mask selecting the length field.
    #[inline]
    pub const fn length_mask(&self) -> u16 {
        ((1u32 << self.length_bits) - 1) as u16
    }

    /// Decode a raw pair into `(offset, length)`.
    #[inline]
    pub const fn decode(&self, raw: u16) -> (usize, usize) {
        let offset = (raw >> self.length_bits) as usize + 1;
        let length = (raw & self.length_mask()) as usize + MIN_MATCH;
        (offset, length)
    }
}

/// Look up the split for `position` bytes already produced in the chunk.
///
/// Positions past [`CHUNK_SIZE`] keep the widest offset field; the decoder
/// rejects such positions separately.
#[inline]
pub const fn split_for_position(position: usize) -> Split {
    let mut i = 0;
    while i < SPLIT_TABLE.len() - 1 && position > SPLIT_TABLE[i].0 {
        i += 1;
    }
    Split {
        offset_bits: SPLIT_TABLE[i].1,
        length_bits: SPLIT_TABLE[i].2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_sum_to_sixteen() {
        for pos in 0..=CHUNK_SIZE {
            let split = split_for_position(pos);
            assert_eq!(split.offset_bits + split.length_bits, 16);
        }
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(split_for_position(1).offset_bits, 4);
        assert_eq!(split_for_position(16).offset_bits, 4);
        assert_eq!(split_for_position(17).offset_bits, 5);
        assert_eq!(split_for_position(32).offset_bits, 5);
        assert_eq!(split_for_position(33).offset_bits, 6);
        assert_eq!(split_for_position(2048).offset_bits, 11);
        assert_eq!(split_for_position(2049).offset_bits, 12);
        assert_eq!(split_for_position(4096).offset_bits, 12);
    }

    #[test]
    fn test_offset_field_can_reach_position() {
        // The widest encodable offset always covers the whole history.
        for pos in 1..=CHUNK_SIZE {
            let split = split_for_position(pos);
            assert!((1usize << split.offset_bits) >= pos);
        }
    }

    #[test]
    fn test_decode() {
        let split = split_for_position(1);
        assert_eq!(split.decode(0x0002), (1, 5));
        assert_eq!(split.decode(0xF000), (16, 3));

        let split = split_for_position(17);
        assert_eq!(split.length_mask(), 0x07FF);
        assert_eq!(split.decode(0x8000), (17, 3));
    }
}
