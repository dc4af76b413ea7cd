//! Performance benchmarks for winlz-lzfu
//!
//! - literals: control bytes of zeros followed by RTF text
//! - references: every token copies the 17 bytes just behind the cursor

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use winlz_lzfu::{MAGIC_COMPRESSED, body_crc, decompress};

const RTF: &[u8] = b"{\\rtf1\\ansi\\ansicpg1252\\pard The quick brown fox\\par }";

fn blob(raw_size: usize, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 16);
    for field in [
        body.len() as u32 + 12,
        raw_size as u32,
        MAGIC_COMPRESSED,
        body_crc(body),
    ] {
        out.extend_from_slice(&field.to_le_bytes());
    }
    out.extend_from_slice(body);
    out
}

fn literals(size: usize) -> Vec<u8> {
    let mut body = Vec::with_capacity(size + size / 8 + 1);
    for group in (0..size).collect::<Vec<_>>().chunks(8) {
        body.push(0x00);
        body.extend(group.iter().map(|&i| RTF[i % RTF.len()]));
    }
    blob(size, &body)
}

fn references(size: usize) -> Vec<u8> {
    let tokens = size.div_ceil(17);
    let mut body = Vec::with_capacity(tokens * 2 + tokens / 8 + 1);
    let mut cursor = 207usize;
    for group in 0..tokens.div_ceil(8) {
        body.push(0xFF);
        for _ in 0..(tokens - group * 8).min(8) {
            // Never the cursor slot itself, which would end the stream.
            let slot = (cursor + 4096 - 17) & 0xFFF;
            body.extend_from_slice(&(((slot << 4) | 0x0F) as u16).to_be_bytes());
            cursor = (cursor + 17) & 0xFFF;
        }
    }
    blob(size, &body)
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzfu_decompress");

    for (name, size) in [("4KB", 4 * 1024), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)] {
        group.throughput(Throughput::Bytes(size as u64));

        let input = literals(size);
        group.bench_with_input(BenchmarkId::new("literals", name), &input, |b, input| {
            b.iter(|| decompress(black_box(input), size).unwrap())
        });

        let input = references(size);
        group.bench_with_input(BenchmarkId::new("references", name), &input, |b, input| {
            b.iter(|| decompress(black_box(input), size).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decompress);
criterion_main!(benches);
