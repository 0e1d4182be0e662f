// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::{LinkedList, VecDeque};
use std::hint::black_box;
use structure_bench::*;

fn bench_bfs(c: &mut Criterion) {
    let config = BenchConfig::from_env().expect("bench config");
    let mut workload = Workload::from_config(&config);
    let mut group = c.benchmark_group("Graph BFS");
    group.sample_size(10);
    for nodes in config.graph.points() {
        let graph = workload.random_graph(nodes);
        let starts: Vec<usize> = (0..nodes).collect();
        let start = *workload.pick(&starts).unwrap_or(&0);
        group.bench_function(BenchmarkId::new("deque", nodes), |b| {
            b.iter(|| graph.bfs(black_box(start)).unwrap())
        });
    }
    group.finish();
}

fn bench_queue(c: &mut Criterion) {
    let config = BenchConfig::from_env().expect("bench config");
    let mut group = c.benchmark_group("Queue Push/Pop");
    for items in config.queue.points() {
        group.bench_function(BenchmarkId::new("deque", items), |b| {
            b.iter(|| queue_churn::<VecDeque<usize>>(black_box(items)))
        });
        group.bench_function(BenchmarkId::new("list", items), |b| {
            b.iter(|| queue_churn::<LinkedList<usize>>(black_box(items)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bfs, bench_queue);
criterion_main!(benches);
