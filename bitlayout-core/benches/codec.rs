//! Scalar codec benchmarks.

use bitlayout_core::{decode_int, decode_uint, encode_int, encode_uint};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn benchmark_uint_encode(c: &mut Criterion) {
    let mut buf = [0u8; 64];

    c.bench_function("encode_uint_11_bits_unaligned", |b| {
        b.iter(|| {
            encode_uint(black_box(0x5A5), &mut buf, 13, 11).unwrap();
        })
    });

    c.bench_function("encode_uint_32_bits_aligned", |b| {
        b.iter(|| {
            encode_uint(black_box(0xDEAD_BEEF), &mut buf, 32, 32).unwrap();
        })
    });
}

fn benchmark_uint_decode(c: &mut Criterion) {
    let mut buf = [0u8; 64];
    encode_uint(0x5A5, &mut buf, 13, 11).unwrap();
    encode_uint(0xDEAD_BEEF, &mut buf, 32, 32).unwrap();

    c.bench_function("decode_uint_11_bits_unaligned", |b| {
        b.iter(|| black_box(decode_uint(&buf, 13, 11).unwrap()))
    });

    c.bench_function("decode_uint_32_bits_aligned", |b| {
        b.iter(|| black_box(decode_uint(&buf, 32, 32).unwrap()))
    });
}

fn benchmark_int_round_trip(c: &mut Criterion) {
    let mut buf = [0u8; 64];

    c.bench_function("int_round_trip_12_bits", |b| {
        b.iter(|| {
            encode_int(black_box(-1234), &mut buf, 7, 12).unwrap();
            black_box(decode_int(&buf, 7, 12).unwrap())
        })
    });
}

criterion_group!(
    benches,
    benchmark_uint_encode,
    benchmark_uint_decode,
    benchmark_int_round_trip
);
criterion_main!(benches);
