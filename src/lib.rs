//! # structure-bench
//!
//! Alternative implementations of classic data structures, built to be
//! benchmarked against each other: 16-bit sets (flat bitset vs nibble trie),
//! hash sets (separate chaining vs linear probing with tombstones) and dense
//! matrix multiplication (natural, cache-blocked, parallel).

pub mod bitset;
pub mod chained;
pub mod config;
pub mod graph;
pub mod linear_probing;
pub mod matrix;
pub mod nibble_trie;
pub mod traits;
pub mod workload;

// Re-export core traits
pub use traits::{KeySet, SetAlgebra, StructureError};

pub use bitset::BitSet16;
pub use chained::ChainedHashSet;
pub use config::{BenchConfig, Sweep, TableConfig};
pub use graph::Graph;
pub use linear_probing::{LinearProbingHashSet, SipBuildHasher};
pub use matrix::Matrix;
pub use nibble_trie::NibbleTrie;
pub use workload::{populate, queue_churn, FifoQueue, Workload};
