//! Performance benchmarks for winlz-lznt1
//!
//! Streams are assembled by hand from the three chunk shapes that dominate
//! real NTFS data:
//! - stored chunks (incompressible data)
//! - literal-heavy compressed chunks
//! - run chunks (one literal plus a maximal overlapping copy)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use winlz_lznt1::decompress;

/// Type alias for stream generator functions
type StreamGenerator = fn(usize) -> Vec<u8>;

mod streams {
    /// Random bytes as stored chunks.
    pub fn stored(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x123456789ABCDEF0;
        let mut data = Vec::with_capacity(size);
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }

        let mut out = Vec::with_capacity(size + size / 2048 + 2);
        for chunk in data.chunks(4096) {
            let header = 0x3000u16 | (chunk.len() as u16 - 1);
            out.extend_from_slice(&header.to_le_bytes());
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Text as compressed chunks holding only literals.
    pub fn literals(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. ";
        let mut out = Vec::new();
        let mut produced = 0;

        while produced < size {
            // 3584 literals plus 448 flag bytes keep the body under 4096.
            let take = (size - produced).min(3584);
            let mut body = Vec::with_capacity(take + take / 8 + 1);
            for group in (0..take).collect::<Vec<_>>().chunks(8) {
                body.push(0x00);
                for &i in group {
                    body.push(text[(produced + i) % text.len()]);
                }
            }
            let header = 0xB000u16 | (body.len() as u16 - 1);
            out.extend_from_slice(&header.to_le_bytes());
            out.extend_from_slice(&body);
            produced += take;
        }
        out
    }

    /// Full 4096-byte runs, one literal and one copy per chunk.
    pub fn runs(size: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for i in 0..size.div_ceil(4096) {
            // Flag 0b10: literal then pair; pair 0x0FFC = offset 1, length 4095.
            out.extend_from_slice(&[0x03, 0xB0, 0x02, (i % 251) as u8, 0xFC, 0x0F]);
        }
        out
    }
}

fn bench_decompress_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_throughput");

    let patterns: [(&str, StreamGenerator); 3] = [
        ("stored", streams::stored),
        ("literals", streams::literals),
        ("runs", streams::runs),
    ];
    let sizes = [("4KB", 4 * 1024), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)];

    for (pattern_name, generator) in patterns {
        for (size_name, size) in sizes {
            let input = generator(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern_name, size_name),
                &input,
                |b, input| b.iter(|| decompress(black_box(input), size).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_decompress_throughput);
criterion_main!(benches);
