// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};
use thiserror::Error;

/// Error type for data structure operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructureError {
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
    #[error("Invalid load factor: {0}")]
    InvalidLoadFactor(f32),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Common set interface shared by every implementation under benchmark.
///
/// The benchmark harness only ever talks to a container through this trait,
/// so each variant is measured doing exactly the same work.
pub trait KeySet<K> {
    /// Inserts a key. Returns `Ok(true)` if it was not present before.
    ///
    /// Only containers with internal invariants (the open-addressed table)
    /// can fail here, and then only on a bug in their growth policy.
    fn insert_key(&mut self, key: K) -> Result<bool, StructureError>;

    /// Returns true if the key is present.
    fn contains_key(&self, key: &K) -> bool;

    /// Removes a key. Returns true if something was removed.
    fn erase_key(&mut self, key: &K) -> bool;

    /// Number of live keys.
    fn len(&self) -> usize;

    /// Returns true if no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whole-set union and intersection producing a fresh set.
pub trait SetAlgebra: Sized {
    fn union(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
}

impl<K: Hash + Eq, S: BuildHasher> KeySet<K> for HashSet<K, S> {
    fn insert_key(&mut self, key: K) -> Result<bool, StructureError> {
        Ok(self.insert(key))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn erase_key(&mut self, key: &K) -> bool {
        self.remove(key)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<K: Ord> KeySet<K> for BTreeSet<K> {
    fn insert_key(&mut self, key: K) -> Result<bool, StructureError> {
        Ok(self.insert(key))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn erase_key(&mut self, key: &K) -> bool {
        self.remove(key)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}
