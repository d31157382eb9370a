/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flif_core::bytestream::ByteCursor;
use flif_maniac::{PropertySymbolCoder, RacDecoder, RacEncoder, Tree};
use nanorand::{Rng, WyRand};

const SYMBOLS: usize = 100_000;

fn make_symbols() -> Vec<([i32; 2], i32)> {
    let mut rng = WyRand::new_seed(0xBEEF);
    (0..SYMBOLS)
        .map(|_| {
            let properties = [
                rng.generate_range(0..256_u32) as i32,
                rng.generate_range(0..256_u32) as i32 - 128,
            ];
            let value = rng.generate_range(0..1024_u32) as i32 - 512;
            (properties, value)
        })
        .collect()
}

fn encode(symbols: &[([i32; 2], i32)]) -> Vec<u8> {
    let ranges = [(0, 255), (-128, 127)];
    let mut sink = Vec::with_capacity(SYMBOLS);
    let mut rac = RacEncoder::new(&mut sink);
    let mut coder = PropertySymbolCoder::new(&ranges, Tree::new());
    for (properties, value) in symbols {
        coder
            .write_int(&mut rac, properties, -512, 511, *value)
            .unwrap();
    }
    rac.flush().unwrap();
    drop(rac);
    sink
}

fn decode(stream: &[u8]) -> i64 {
    let ranges = [(0, 255), (-128, 127)];
    let mut rac = RacDecoder::new(ByteCursor::new(stream)).unwrap();
    let mut coder = PropertySymbolCoder::new(&ranges, Tree::new());
    let mut rng = WyRand::new_seed(0xBEEF);
    let mut sum = 0_i64;
    for _ in 0..SYMBOLS {
        let properties = [
            rng.generate_range(0..256_u32) as i32,
            rng.generate_range(0..256_u32) as i32 - 128,
        ];
        // burn the value draw to stay in sync with make_symbols
        let _ = rng.generate_range(0..1024_u32);
        sum += i64::from(coder.read_int(&mut rac, &properties, -512, 511).unwrap());
    }
    sum
}

fn bench_coder(c: &mut Criterion) {
    let symbols = make_symbols();
    let stream = encode(&symbols);

    let mut group = c.benchmark_group("maniac: bounded integers");
    group.throughput(Throughput::Elements(SYMBOLS as u64));

    group.bench_function("encode", |b| b.iter(|| black_box(encode(&symbols))));
    group.bench_function("decode", |b| b.iter(|| black_box(decode(&stream))));
}

criterion_group!(benches, bench_coder);
criterion_main!(benches);
