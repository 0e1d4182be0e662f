// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::StructureError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Directed graph stored as a dense `n x n` adjacency matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    nodes: usize,
    edges: Vec<bool>,
}

impl Graph {
    /// Graph with `nodes` vertices and no edges.
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            edges: vec![false; nodes * nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }

    fn check(&self, node: usize) -> Result<(), StructureError> {
        if node >= self.nodes {
            return Err(StructureError::OutOfBounds(format!(
                "node {} in graph of {} nodes",
                node, self.nodes
            )));
        }
        Ok(())
    }

    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), StructureError> {
        self.check(from)?;
        self.check(to)?;
        self.edges[from * self.nodes + to] = true;
        Ok(())
    }

    /// Returns false for out-of-range nodes.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from < self.nodes && to < self.nodes && self.edges[from * self.nodes + to]
    }

    /// Breadth-first search from `start`; returns nodes in visit order.
    pub fn bfs(&self, start: usize) -> Result<Vec<usize>, StructureError> {
        self.check(start)?;
        let mut visited = vec![false; self.nodes];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        visited[start] = true;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            let row = &self.edges[node * self.nodes..(node + 1) * self.nodes];
            for (next, &edge) in row.iter().enumerate() {
                if edge && !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        Ok(order)
    }
}
