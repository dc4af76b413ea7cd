//! CRC-32 implementation.
//!
//! One polynomial, two presets:
//!
//! - **CRC-32 (ISO 3309)**: initial value and final XOR `0xFFFFFFFF`, as used
//!   by ZIP, GZIP and PNG.
//! - **Raw register** ([`Crc32::with_initial`]): the same table-driven update
//!   with a caller-chosen start value and no final XOR. LZFU (compressed RTF)
//!   headers carry this form with an initial value of 0.
//!
//! ## Performance Optimization
//!
//! Data of 16 bytes or more is processed with the "slicing-by-8" technique,
//! 8 bytes at a time using 8 pre-computed lookup tables. Shorter data uses a
//! single-table lookup.

/// Reflected CRC-32 polynomial.
const POLYNOMIAL: u32 = 0xEDB88320;

/// CRC-32 slicing-by-8 lookup tables; table 0 is the classic byte table.
const CRC32_TABLE_SLICE: [[u32; 256]; 8] = {
    let mut tables = [[0u32; 256]; 8];

    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLYNOMIAL;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        tables[0][i] = crc;
        i += 1;
    }

    let mut t = 1;
    while t < 8 {
        let mut i = 0usize;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
            i += 1;
        }
        t += 1;
    }

    tables
};

/// CRC-32 calculator.
///
/// - Polynomial: 0x04C11DB7 (reflected: 0xEDB88320)
/// - Initial value: 0xFFFFFFFF (or any value via [`Crc32::with_initial`])
/// - Final XOR: 0xFFFFFFFF for [`Crc32::finalize`], none for [`Crc32::register`]
///
/// # Example
///
/// ```
/// use winlz_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, World!");
/// assert_eq!(crc.finalize(), 0xEC4AC3D0);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32 {
    crc: u32,
    initial: u32,
}

impl Crc32 {
    /// Create a new ISO 3309 CRC-32 calculator.
    pub fn new() -> Self {
        Self::with_initial(0xFFFFFFFF)
    }

    /// Create a calculator with a raw initial register value.
    pub fn with_initial(initial: u32) -> Self {
        Self {
            crc: initial,
            initial,
        }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = self.initial;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        if data.len() >= 16 {
            crc32_slice8(&mut self.crc, data);
        } else {
            crc32_sw(&mut self.crc, data);
        }
    }

    /// Get the raw register value, without the final XOR.
    #[inline(always)]
    pub fn register(&self) -> u32 {
        self.crc
    }

    /// Finalize and return the ISO 3309 CRC value.
    #[inline(always)]
    pub fn finalize(self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// Compute the ISO 3309 CRC-32 for a slice in one call.
    #[inline]
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Compute the raw-register CRC for a slice in one call.
    #[inline]
    pub fn compute_raw(initial: u32, data: &[u8]) -> u32 {
        let mut crc = Self::with_initial(initial);
        crc.update(data);
        crc.register()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Software CRC-32 implementation using single lookup table.
#[inline]
fn crc32_sw(crc: &mut u32, data: &[u8]) {
    let table = &CRC32_TABLE_SLICE[0];
    for &byte in data {
        let index = ((*crc ^ byte as u32) & 0xFF) as usize;
        *crc = table[index] ^ (*crc >> 8);
    }
}

/// CRC-32 using slicing-by-8, processing 8 bytes per step.
#[inline]
fn crc32_slice8(crc: &mut u32, data: &[u8]) {
    let mut c = *crc;
    let mut chunks = data.chunks_exact(8);

    for bytes in &mut chunks {
        let crc_xor = c ^ u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let b0 = (crc_xor & 0xFF) as usize;
        let b1 = ((crc_xor >> 8) & 0xFF) as usize;
        let b2 = ((crc_xor >> 16) & 0xFF) as usize;
        let b3 = ((crc_xor >> 24) & 0xFF) as usize;

        c = CRC32_TABLE_SLICE[7][b0]
            ^ CRC32_TABLE_SLICE[6][b1]
            ^ CRC32_TABLE_SLICE[5][b2]
            ^ CRC32_TABLE_SLICE[4][b3]
            ^ CRC32_TABLE_SLICE[3][bytes[4] as usize]
            ^ CRC32_TABLE_SLICE[2][bytes[5] as usize]
            ^ CRC32_TABLE_SLICE[1][bytes[6] as usize]
            ^ CRC32_TABLE_SLICE[0][bytes[7] as usize];
    }

    crc32_sw(&mut c, chunks.remainder());
    *crc = c;
}
