// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::config::{validate_load_factor, TableConfig, DEFAULT_MAX_LOAD_FACTOR};
use crate::traits::{KeySet, StructureError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Keyed SipHash-1-3 builder shared by both hash tables.
///
/// The default keys are zero, so hashing is deterministic across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SipBuildHasher {
    k0: u64,
    k1: u64,
}

impl SipBuildHasher {
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

impl BuildHasher for SipBuildHasher {
    type Hasher = SipHasher13;

    fn build_hasher(&self) -> SipHasher13 {
        SipHasher13::new_with_keys(self.k0, self.k1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<K> {
    Empty,
    Occupied(K),
    Tombstone,
}

/// Linear-Probing Hash Set: open addressing with tombstone deletion.
///
/// All keys live directly in one slot array. A key is stored at the first
/// Empty slot found by probing forward (wrapping) from `hash(key) % capacity`.
/// Erasing a key leaves a tombstone that later probes walk past, so keys
/// inserted after a collision stay reachable.
///
/// # Key Properties
///
/// - **Growth**: After an insert the table doubles until
///   `len / capacity <= max_load_factor` and at least one slot is Empty.
/// - **Tombstones**: Never cleared in place. Only a rebuild reclaims them,
///   either when the table grows or when live entries plus tombstones
///   would crowd out the last Empty slots.
/// - **No shrinking**: Erase never reduces capacity.
///
/// # Iteration
///
/// [`iter`](Self::iter) walks the slot array lazily and yields live keys in
/// slot order. The iterator borrows the table, so no insert, erase or rehash
/// can happen while it is alive. Slot order changes completely on every
/// rebuild; use [`to_vec`](Self::to_vec) for a snapshot that outlives
/// mutation.
///
/// # Example
///
/// ```
/// use structure_bench::LinearProbingHashSet;
///
/// let mut set = LinearProbingHashSet::new();
/// assert!(set.insert(5).unwrap());
/// assert!(!set.insert(5).unwrap());
/// assert!(set.erase(&5));
/// assert!(set.find(&5).is_none());
/// ```
#[derive(Clone)]
pub struct LinearProbingHashSet<K, S = SipBuildHasher> {
    slots: Vec<Slot<K>>,
    entries: usize,
    tombstones: usize,
    max_load_factor: f32,
    hasher: S,
}

fn empty_slots<K>(capacity: usize) -> Vec<Slot<K>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// Slot indices visited from `start`, wrapping, at most `capacity` of them.
fn probe(start: usize, capacity: usize) -> impl Iterator<Item = usize> {
    (0..capacity).map(move |step| (start + step) % capacity)
}

impl<K: Hash + Eq> LinearProbingHashSet<K, SipBuildHasher> {
    /// Creates an empty set with a single slot.
    pub fn new() -> Self {
        Self::with_hasher(SipBuildHasher::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, StructureError> {
        Self::with_capacity_and_hasher(capacity, SipBuildHasher::default())
    }

    pub fn from_config(config: &TableConfig) -> Result<Self, StructureError> {
        config.validate()?;
        let mut set = Self::with_capacity(config.initial_capacity)?;
        set.max_load_factor = config.max_load_factor;
        Ok(set)
    }
}

impl<K: Hash + Eq> Default for LinearProbingHashSet<K, SipBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> LinearProbingHashSet<K, S> {
    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of erased slots not yet reclaimed by a rebuild.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// `len / capacity`, always computed in floating point.
    pub fn load_factor(&self) -> f32 {
        self.entries as f32 / self.slots.len() as f32
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Sets the growth threshold used by future inserts. Does not resize.
    pub fn set_max_load_factor(&mut self, value: f32) -> Result<(), StructureError> {
        validate_load_factor(value)?;
        self.max_load_factor = value;
        Ok(())
    }

    /// Live keys in slot order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.entries,
        }
    }

    /// Owned copy of the live keys, unaffected by later mutation.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Drops every key and tombstone, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.entries = 0;
        self.tombstones = 0;
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<K: Hash + Eq, S: BuildHasher> LinearProbingHashSet<K, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            slots: empty_slots(1),
            entries: 0,
            tombstones: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, StructureError> {
        if capacity == 0 {
            return Err(StructureError::InvalidCapacity(
                "table capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            slots: empty_slots(capacity),
            ..Self::with_hasher(hasher)
        })
    }

    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.slots.len() as u64) as usize
    }

    /// Inserts a key. Returns `Ok(false)` if an equal key is already stored.
    ///
    /// `Err(InvariantViolation)` means the probe found no Empty slot, which
    /// the growth policy should make impossible.
    pub fn insert(&mut self, key: K) -> Result<bool, StructureError> {
        let capacity = self.slots.len();
        let mut vacant = None;
        for idx in probe(self.bucket_of(&key), capacity) {
            match &self.slots[idx] {
                Slot::Empty => {
                    vacant = Some(idx);
                    break;
                }
                Slot::Occupied(existing) if *existing == key => return Ok(false),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }

        let idx = vacant.ok_or_else(|| {
            StructureError::InvariantViolation(format!(
                "no empty slot among {} slots ({} live, {} tombstones)",
                capacity, self.entries, self.tombstones
            ))
        })?;
        self.slots[idx] = Slot::Occupied(key);
        self.entries += 1;
        self.restore_load_bounds()?;
        Ok(true)
    }

    /// Looks up the stored key equal to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.position(key).and_then(|idx| match &self.slots[idx] {
            Slot::Occupied(k) => Some(k),
            _ => None,
        })
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Replaces the key's slot with a tombstone. Returns false if absent.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.position(key) {
            Some(idx) => {
                self.slots[idx] = Slot::Tombstone;
                self.entries -= 1;
                self.tombstones += 1;
                true
            }
            None => false,
        }
    }

    /// Rebuilds the table with `new_capacity` slots, dropping tombstones.
    ///
    /// The new capacity must exceed the number of live keys so that at least
    /// one slot stays Empty. The load factor is not checked here; the next
    /// insert grows the table if needed.
    pub fn rehash(&mut self, new_capacity: usize) -> Result<(), StructureError> {
        if new_capacity <= self.entries {
            return Err(StructureError::InvalidCapacity(format!(
                "capacity {} cannot hold {} keys plus an empty slot",
                new_capacity, self.entries
            )));
        }
        self.rebuild(new_capacity)
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        for idx in probe(self.bucket_of(key), self.slots.len()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(existing) if Borrow::<Q>::borrow(existing) == key => {
                    return Some(idx)
                }
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    fn restore_load_bounds(&mut self) -> Result<(), StructureError> {
        let current = self.slots.len();
        let max_load_factor = self.max_load_factor;
        let exceeds = move |live: usize, capacity: usize| {
            live >= capacity || live as f32 / capacity as f32 > max_load_factor
        };

        let mut target = current;
        while exceeds(self.entries, target) {
            target *= 2;
        }
        if target != current {
            debug!(
                from = current,
                to = target,
                live = self.entries,
                "growing linear probing table"
            );
            return self.rebuild(target);
        }

        if self.tombstones > 0 && exceeds(self.entries + self.tombstones, current) {
            debug!(
                capacity = current,
                tombstones = self.tombstones,
                "reclaiming tombstones"
            );
            return self.rebuild(current);
        }
        Ok(())
    }

    fn rebuild(&mut self, new_capacity: usize) -> Result<(), StructureError> {
        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        let live = self.entries;
        let mut moved = 0;

        for slot in old {
            if moved == live {
                break;
            }
            if let Slot::Occupied(key) = slot {
                let idx = self.vacant_for(&key)?;
                self.slots[idx] = Slot::Occupied(key);
                moved += 1;
            }
        }

        trace!(capacity = new_capacity, moved, "rebuilt slot array");
        self.tombstones = 0;
        self.entries = moved;
        if moved != live {
            return Err(StructureError::InvariantViolation(format!(
                "rebuild moved {} keys but {} were live",
                moved, live
            )));
        }
        Ok(())
    }

    fn vacant_for(&self, key: &K) -> Result<usize, StructureError> {
        probe(self.bucket_of(key), self.slots.len())
            .find(|&idx| matches!(self.slots[idx], Slot::Empty))
            .ok_or_else(|| {
                StructureError::InvariantViolation(format!(
                    "rebuild into {} slots ran out of empty slots",
                    self.slots.len()
                ))
            })
    }
}

impl<K: fmt::Debug, S> fmt::Debug for LinearProbingHashSet<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, S: BuildHasher> KeySet<K> for LinearProbingHashSet<K, S> {
    fn insert_key(&mut self, key: K) -> Result<bool, StructureError> {
        self.insert(key)
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

// ============================================================================
// Iteration
// ============================================================================

/// Borrowing iterator over the live keys of a [`LinearProbingHashSet`].
pub struct Iter<'a, K> {
    slots: std::slice::Iter<'a, Slot<K>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key) = slot {
                self.remaining -= 1;
                return Some(key);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K, S> IntoIterator for &'a LinearProbingHashSet<K, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Serde
// ============================================================================

impl<K: Serialize, S> Serialize for LinearProbingHashSet<K, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, K, S> Deserialize<'de> for LinearProbingHashSet<K, S>
where
    K: DeserializeOwned + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct KeysVisitor<K, S>(PhantomData<(K, S)>);

        impl<'de, K, S> serde::de::Visitor<'de> for KeysVisitor<K, S>
        where
            K: DeserializeOwned + Hash + Eq,
            S: BuildHasher + Default,
        {
            type Value = LinearProbingHashSet<K, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of keys")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut set = LinearProbingHashSet::with_hasher(S::default());
                while let Some(key) = seq.next_element()? {
                    set.insert(key).map_err(serde::de::Error::custom)?;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(KeysVisitor(PhantomData))
    }
}
