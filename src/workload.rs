// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Seeded input generation shared by the benches and the tests.

use crate::config::BenchConfig;
use crate::graph::Graph;
use crate::matrix::Matrix;
use crate::traits::{KeySet, StructureError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{LinkedList, VecDeque};

/// Deterministic source of benchmark inputs.
pub struct Workload {
    rng: StdRng,
}

impl Workload {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(config.seed)
    }

    /// `n` keys drawn uniformly from `0..=max`; duplicates are possible.
    pub fn random_keys(&mut self, n: usize, max: i32) -> Vec<i32> {
        (0..n).map(|_| self.rng.gen_range(0..=max)).collect()
    }

    pub fn random_u16s(&mut self, n: usize) -> Vec<u16> {
        (0..n).map(|_| self.rng.gen()).collect()
    }

    /// Set of type `S` built from `n` random draws.
    pub fn random_set<S: KeySet<u16> + Default>(&mut self, n: usize) -> Result<S, StructureError> {
        let mut set = S::default();
        populate(&mut set, self.random_u16s(n))?;
        Ok(set)
    }

    /// Matrix of small random integers stored as `f64`.
    pub fn random_matrix(&mut self, rows: usize, cols: usize) -> Matrix<f64> {
        let mut matrix = Matrix::new(rows, cols);
        for value in matrix.as_mut_slice() {
            *value = self.rng.gen::<i16>() as f64;
        }
        matrix
    }

    /// Graph where each directed edge exists with probability one half.
    pub fn random_graph(&mut self, nodes: usize) -> Graph {
        let mut graph = Graph::new(nodes);
        for from in 0..nodes {
            for to in 0..nodes {
                if self.rng.gen_bool(0.5) {
                    // Both indices are below `nodes`.
                    let _ = graph.add_edge(from, to);
                }
            }
        }
        graph
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.rng.gen_range(0..items.len()))
    }
}

/// Inserts every key, returning how many were new.
pub fn populate<K, S: KeySet<K>>(
    set: &mut S,
    keys: impl IntoIterator<Item = K>,
) -> Result<usize, StructureError> {
    let mut fresh = 0;
    for key in keys {
        if set.insert_key(key)? {
            fresh += 1;
        }
    }
    Ok(fresh)
}

/// Minimal FIFO interface for the queue churn workload.
pub trait FifoQueue<T> {
    fn push(&mut self, value: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> FifoQueue<T> for VecDeque<T> {
    fn push(&mut self, value: T) {
        self.push_back(value);
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> FifoQueue<T> for LinkedList<T> {
    fn push(&mut self, value: T) {
        self.push_back(value);
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}

/// Runs `steps` queue operations: every third step pops when the queue is
/// non-empty, every other step pushes the step index.
pub fn queue_churn<Q: FifoQueue<usize> + Default>(steps: usize) -> Q {
    let mut queue = Q::default();
    for step in 0..steps {
        if step % 3 == 0 && !queue.is_empty() {
            queue.pop();
        } else {
            queue.push(step);
        }
    }
    queue
}
