// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::{KeySet, SetAlgebra, StructureError};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

const WORD_BITS: usize = 64;
const WORDS: usize = (u16::MAX as usize + 1) / WORD_BITS;

/// BitSet16: a flat 65,536-bit set of `u16` values.
///
/// One bit per possible key, so every operation is a single word access and
/// union/intersection are word-wise `|` and `&`. Memory use is a constant
/// 8 KiB regardless of how many keys are stored.
///
/// # Example
///
/// ```
/// use structure_bench::BitSet16;
///
/// let mut a = BitSet16::new();
/// a.insert(1);
/// a.insert(u16::MAX);
///
/// let mut b = BitSet16::new();
/// b.insert(1);
///
/// assert_eq!((&a & &b).len(), 1);
/// assert_eq!((&a | &b).len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<u16>", from = "Vec<u16>")]
pub struct BitSet16 {
    words: Vec<u64>,
}

impl Default for BitSet16 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BitSet16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[inline]
fn locate(value: u16) -> (usize, u64) {
    let value = value as usize;
    (value / WORD_BITS, 1u64 << (value % WORD_BITS))
}

impl BitSet16 {
    pub fn new() -> Self {
        Self {
            words: vec![0; WORDS],
        }
    }

    /// Returns true if the value was not already present.
    pub fn insert(&mut self, value: u16) -> bool {
        let (word, mask) = locate(value);
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    /// Returns true if the value was present.
    pub fn erase(&mut self, value: u16) -> bool {
        let (word, mask) = locate(value);
        let present = self.words[word] & mask != 0;
        self.words[word] &= !mask;
        present
    }

    pub fn contains(&self, value: u16) -> bool {
        let (word, mask) = locate(value);
        self.words[word] & mask != 0
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.words.iter().enumerate().flat_map(|(idx, &word)| {
            let base = idx * WORD_BITS;
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some((base + bit) as u16)
            })
        })
    }

    fn zip_words(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }
}

impl BitOr for &BitSet16 {
    type Output = BitSet16;

    fn bitor(self, rhs: &BitSet16) -> BitSet16 {
        self.zip_words(rhs, |a, b| a | b)
    }
}

impl BitAnd for &BitSet16 {
    type Output = BitSet16;

    fn bitand(self, rhs: &BitSet16) -> BitSet16 {
        self.zip_words(rhs, |a, b| a & b)
    }
}

impl SetAlgebra for BitSet16 {
    fn union(&self, other: &Self) -> Self {
        self | other
    }

    fn intersection(&self, other: &Self) -> Self {
        self & other
    }
}

impl KeySet<u16> for BitSet16 {
    fn insert_key(&mut self, key: u16) -> Result<bool, StructureError> {
        Ok(self.insert(key))
    }

    fn contains_key(&self, key: &u16) -> bool {
        self.contains(*key)
    }

    fn erase_key(&mut self, key: &u16) -> bool {
        self.erase(*key)
    }

    fn len(&self) -> usize {
        BitSet16::len(self)
    }
}

impl FromIterator<u16> for BitSet16 {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl From<Vec<u16>> for BitSet16 {
    fn from(values: Vec<u16>) -> Self {
        values.into_iter().collect()
    }
}

impl From<BitSet16> for Vec<u16> {
    fn from(set: BitSet16) -> Self {
        set.iter().collect()
    }
}
