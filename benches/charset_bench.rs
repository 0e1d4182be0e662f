// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;
use structure_bench::*;

fn insert_all<S: KeySet<u16> + Default>(values: &[u16]) -> S {
    let mut set = S::default();
    for &value in values {
        set.insert_key(black_box(value)).unwrap();
    }
    set
}

fn bench_insert_erase(c: &mut Criterion) {
    let config = BenchConfig::from_env().expect("bench config");
    let mut workload = Workload::from_config(&config);

    let mut group = c.benchmark_group("Charset Insert");
    for items in config.charset.points() {
        let values = workload.random_u16s(items);
        group.bench_with_input(BenchmarkId::new("bitset", items), &values, |b, v| {
            b.iter(|| insert_all::<BitSet16>(v))
        });
        group.bench_with_input(BenchmarkId::new("nibble-trie", items), &values, |b, v| {
            b.iter(|| insert_all::<NibbleTrie>(v))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Charset Erase");
    for items in config.charset.points() {
        let bits: BitSet16 = workload.random_set(items / 2).expect("bitset setup");
        let trie: NibbleTrie = workload.random_set(items / 2).expect("trie setup");
        let victims = workload.random_u16s(256);

        group.bench_function(BenchmarkId::new("bitset", items), |b| {
            b.iter_batched(
                || bits.clone(),
                |mut set| {
                    for v in &victims {
                        set.erase(black_box(*v));
                    }
                    set
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("nibble-trie", items), |b| {
            b.iter_batched(
                || trie.clone(),
                |mut set| {
                    for v in &victims {
                        set.erase(black_box(*v));
                    }
                    set
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_union_intersect(c: &mut Criterion) {
    let config = BenchConfig::from_env().expect("bench config");
    let mut workload = Workload::from_config(&config);

    let mut union = c.benchmark_group("Charset Union");
    let mut sets = Vec::new();
    for items in config.charset.points() {
        let b1: BitSet16 = workload.random_set(items).expect("bitset setup");
        let b2: BitSet16 = workload.random_set(items).expect("bitset setup");
        let t1: NibbleTrie = workload.random_set(items).expect("trie setup");
        let t2: NibbleTrie = workload.random_set(items).expect("trie setup");
        union.bench_function(BenchmarkId::new("bitset", items), |b| {
            b.iter(|| black_box(&b1).union(black_box(&b2)))
        });
        union.bench_function(BenchmarkId::new("nibble-trie", items), |b| {
            b.iter(|| black_box(&t1).union(black_box(&t2)))
        });
        sets.push((items, b1, b2, t1, t2));
    }
    union.finish();

    let mut intersect = c.benchmark_group("Charset Intersect");
    for (items, b1, b2, t1, t2) in &sets {
        intersect.bench_function(BenchmarkId::new("bitset", items), |b| {
            b.iter(|| black_box(b1).intersection(black_box(b2)))
        });
        intersect.bench_function(BenchmarkId::new("nibble-trie", items), |b| {
            b.iter(|| black_box(t1).intersection(black_box(t2)))
        });
    }
    intersect.finish();
}

criterion_group!(benches, bench_insert_erase, bench_union_intersect);
criterion_main!(benches);
