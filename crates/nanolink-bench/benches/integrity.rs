//! Integrity primitive benchmarks.
//!
//! Establishes baselines for the per-frame work the ground segment does
//! before every uplink.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nanolink_bench::{FRAME_SIZES, bench_key, frame};
use nanolink_integrity::{
    ByteOrder, Crc32, DIGEST_LENGTH, INITIAL_SEED, SignatureMask, TableVariant, checksum,
    checksum_with, keyed_digest, payload_crc32,
};

// ============================================================================
// Checksum Benchmarks
// ============================================================================

fn bench_frame_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_checksum");

    for size in FRAME_SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let data = frame(size, 1);

        group.bench_with_input(BenchmarkId::new("legacy", size), &data, |b, data| {
            b.iter(|| black_box(checksum(black_box(INITIAL_SEED), black_box(data))));
        });
        group.bench_with_input(BenchmarkId::new("ieee", size), &data, |b, data| {
            b.iter(|| {
                black_box(checksum_with(
                    TableVariant::Ieee,
                    black_box(INITIAL_SEED),
                    black_box(data),
                ))
            });
        });
    }

    group.finish();
}

fn bench_streaming_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_checksum");

    let data = frame(4096, 2);
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("4kb_in_256b_chunks", |b| {
        b.iter(|| {
            let mut crc = Crc32::default();
            for chunk in black_box(&data).chunks(256) {
                crc.update(chunk);
            }
            black_box(crc.finalize());
        });
    });

    group.finish();
}

fn bench_payload_crc(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_crc32");

    for size in FRAME_SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let data = frame(size, 3);

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(payload_crc32(black_box(data))));
        });
    }

    group.finish();
}

// ============================================================================
// Keyed Digest Benchmarks
// ============================================================================

fn bench_keyed_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed_digest");

    let key = bench_key(4);
    for size in FRAME_SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let data = frame(size, 5);

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut digest = [0u8; DIGEST_LENGTH];
                keyed_digest(&key, black_box(data), &mut digest).ok();
                black_box(digest);
            });
        });
    }

    group.finish();
}

fn bench_sign_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_frame");

    let key = bench_key(6);
    let mask = SignatureMask::default();
    let data = frame(256, 7);

    group.bench_function("digest_and_mask_256b", |b| {
        b.iter(|| {
            let mut digest = [0u8; DIGEST_LENGTH];
            keyed_digest(&key, black_box(&data), &mut digest).ok();
            black_box(mask.apply(&digest, ByteOrder::LittleEndian));
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    integrity_benches,
    bench_frame_checksum,
    bench_streaming_checksum,
    bench_payload_crc,
    bench_keyed_digest,
    bench_sign_frame
);

criterion_main!(integrity_benches);
