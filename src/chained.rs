// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::linear_probing::SipBuildHasher;
use crate::traits::{KeySet, StructureError};
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use tracing::debug;

/// Default average chain length before the bucket array doubles.
pub const DEFAULT_CHAIN_LOAD_FACTOR: f32 = 10.0;

/// Chained Hash Set: separate chaining over a vector of buckets.
///
/// Each bucket holds every key hashing to it. Erase removes the key from
/// its bucket directly, so there is nothing like a tombstone here. Present
/// as the baseline the linear-probing table is measured against.
#[derive(Debug, Clone)]
pub struct ChainedHashSet<K, S = SipBuildHasher> {
    buckets: Vec<Vec<K>>,
    entries: usize,
    max_load_factor: f32,
    hasher: S,
}

impl<K: Hash + Eq> ChainedHashSet<K, SipBuildHasher> {
    pub fn new() -> Self {
        Self::with_hasher(SipBuildHasher::default())
    }
}

impl<K: Hash + Eq> Default for ChainedHashSet<K, SipBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, S: BuildHasher> ChainedHashSet<K, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: vec![Vec::new()],
            entries: 0,
            max_load_factor: DEFAULT_CHAIN_LOAD_FACTOR,
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Average chain length.
    pub fn load_factor(&self) -> f32 {
        self.entries as f32 / self.buckets.len() as f32
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Chains may be longer than one, so any positive threshold is allowed.
    pub fn set_max_load_factor(&mut self, value: f32) -> Result<(), StructureError> {
        if value.is_nan() || value <= 0.0 {
            return Err(StructureError::InvalidLoadFactor(value));
        }
        self.max_load_factor = value;
        Ok(())
    }

    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    pub fn insert(&mut self, key: K) -> bool {
        let idx = self.bucket_of(&key);
        if self.buckets[idx].contains(&key) {
            return false;
        }
        self.buckets[idx].push(key);
        self.entries += 1;
        if self.load_factor() > self.max_load_factor {
            let target = self.buckets.len() * 2;
            debug!(from = self.buckets.len(), to = target, "growing chained table");
            self.redistribute(target);
        }
        true
    }

    pub fn find<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|k| Borrow::<Q>::borrow(*k) == key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_of(key);
        let bucket = &mut self.buckets[idx];
        match bucket.iter().position(|k| Borrow::<Q>::borrow(k) == key) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.entries -= 1;
                true
            }
            None => false,
        }
    }

    /// Redistributes every key over `new_capacity` buckets.
    pub fn rehash(&mut self, new_capacity: usize) -> Result<(), StructureError> {
        if new_capacity == 0 {
            return Err(StructureError::InvalidCapacity(
                "bucket count must be at least 1".to_string(),
            ));
        }
        self.redistribute(new_capacity);
        Ok(())
    }

    fn redistribute(&mut self, new_capacity: usize) {
        let fresh = std::iter::repeat_with(Vec::new).take(new_capacity).collect();
        let old = std::mem::replace(&mut self.buckets, fresh);
        for key in old.into_iter().flatten() {
            let idx = self.bucket_of(&key);
            self.buckets[idx].push(key);
        }
    }

    /// Keys bucket by bucket, skipping empty chains.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.iter().flatten()
    }
}

impl<K: Hash + Eq, S: BuildHasher> KeySet<K> for ChainedHashSet<K, S> {
    fn insert_key(&mut self, key: K) -> Result<bool, StructureError> {
        Ok(self.insert(key))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn erase_key(&mut self, key: &K) -> bool {
        self.erase(key)
    }

    fn len(&self) -> usize {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_find_erase() {
        let mut set = ChainedHashSet::new();
        assert!(set.insert(10));
        assert!(!set.insert(10));
        assert!(set.contains(&10));
        assert!(set.erase(&10));
        assert!(!set.erase(&10));
        assert!(set.is_empty());
    }

    #[test]
    fn test_grows_past_load_factor() {
        let mut set = ChainedHashSet::new();
        set.set_max_load_factor(2.0).unwrap();
        for key in 0..100 {
            set.insert(key);
        }
        assert!(set.load_factor() <= 2.0);
        assert!(set.capacity() >= 50);
        assert!((0..100).all(|k| set.contains(&k)));
    }

    #[test]
    fn test_rehash_keeps_keys() {
        let mut set = ChainedHashSet::new();
        for key in 0..40 {
            set.insert(key);
        }
        set.rehash(3).unwrap();
        assert_eq!(set.capacity(), 3);
        assert_eq!(set.iter().count(), 40);
        assert!(set.rehash(0).is_err());
    }

    #[test]
    fn test_invalid_load_factor() {
        let mut set: ChainedHashSet<i32> = ChainedHashSet::new();
        assert!(set.set_max_load_factor(0.0).is_err());
        assert!(set.set_max_load_factor(f32::NAN).is_err());
    }
}
