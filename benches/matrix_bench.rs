// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use structure_bench::*;

fn bench_multiplication(c: &mut Criterion) {
    let config = BenchConfig::from_env().expect("bench config");
    let mut workload = Workload::from_config(&config);
    let mut group = c.benchmark_group("Matrix Multiplication");
    for n in config.matrix.points() {
        let m1 = workload.random_matrix(n, n);
        let m2 = workload.random_matrix(n, n);

        group.bench_function(BenchmarkId::new("natural order", n), |b| {
            b.iter(|| m1.natural_mul(black_box(&m2)).unwrap())
        });
        group.bench_function(BenchmarkId::new("cache-efficient order(8)", n), |b| {
            b.iter(|| m1.blocked_mul(black_box(&m2)).unwrap())
        });
        group.bench_function(BenchmarkId::new("parallel", n), |b| {
            b.iter(|| m1.parallel_mul(black_box(&m2)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_multiplication);
criterion_main!(benches);
