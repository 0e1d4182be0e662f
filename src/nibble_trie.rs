// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crate::traits::{KeySet, SetAlgebra, StructureError};

const LEVELS: usize = 4;
const FANOUT: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    children: Vec<Node>,
    accepting: bool,
}

#[derive(Debug, Clone, Copy)]
enum Combine {
    Union,
    Intersection,
}

#[inline]
fn nibble(value: u16, level: usize) -> usize {
    ((value >> (4 * level)) & 0xF) as usize
}

impl Node {
    fn is_vacant(&self) -> bool {
        !self.accepting && self.children.iter().all(Node::is_vacant)
    }

    fn count(&self) -> usize {
        self.accepting as usize + self.children.iter().map(Node::count).sum::<usize>()
    }

    fn collect(&self, level: usize, prefix: u16, out: &mut Vec<u16>) {
        if level == LEVELS {
            if self.accepting {
                out.push(prefix);
            }
            return;
        }
        for (idx, child) in self.children.iter().enumerate() {
            child.collect(level + 1, prefix | ((idx as u16) << (4 * level)), out);
        }
    }

    fn combine(a: &Node, b: &Node, level: usize, op: Combine) -> Node {
        if level == LEVELS {
            let accepting = match op {
                Combine::Union => a.accepting || b.accepting,
                Combine::Intersection => a.accepting && b.accepting,
            };
            return Node {
                children: Vec::new(),
                accepting,
            };
        }
        match (a.children.is_empty(), b.children.is_empty(), op) {
            (true, true, _) => Node::default(),
            (true, false, Combine::Union) => b.clone(),
            (false, true, Combine::Union) => a.clone(),
            (true, false, Combine::Intersection) | (false, true, Combine::Intersection) => {
                Node::default()
            }
            (false, false, _) => {
                let children: Vec<Node> = a
                    .children
                    .iter()
                    .zip(&b.children)
                    .map(|(x, y)| Node::combine(x, y, level + 1, op))
                    .collect();
                if children.iter().all(Node::is_vacant) {
                    Node::default()
                } else {
                    Node {
                        children,
                        accepting: false,
                    }
                }
            }
        }
    }
}

/// NibbleTrie: a four-level, sixteen-way trie over `u16` values.
///
/// A value is split into four 4-bit nibbles, least significant first, and
/// each nibble selects a child one level down. Inner nodes allocate their
/// sixteen children on first use, so sparse sets stay small. Union and
/// intersection walk both tries in lockstep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NibbleTrie {
    root: Node,
}

impl NibbleTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: u16) -> bool {
        let mut node = &mut self.root;
        for level in 0..LEVELS {
            if node.children.is_empty() {
                node.children = vec![Node::default(); FANOUT];
            }
            node = &mut node.children[nibble(value, level)];
        }
        let fresh = !node.accepting;
        node.accepting = true;
        fresh
    }

    /// Clears the leaf flag. Inner nodes are left allocated.
    pub fn erase(&mut self, value: u16) -> bool {
        let mut node = &mut self.root;
        for level in 0..LEVELS {
            match node.children.get_mut(nibble(value, level)) {
                Some(child) => node = child,
                None => return false,
            }
        }
        std::mem::replace(&mut node.accepting, false)
    }

    pub fn contains(&self, value: u16) -> bool {
        let mut node = &self.root;
        for level in 0..LEVELS {
            match node.children.get(nibble(value, level)) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.accepting
    }

    pub fn len(&self) -> usize {
        self.root.count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_vacant()
    }

    /// Stored values in ascending order.
    pub fn values(&self) -> Vec<u16> {
        let mut out = Vec::new();
        self.root.collect(0, 0, &mut out);
        out.sort_unstable();
        out
    }
}

impl SetAlgebra for NibbleTrie {
    fn union(&self, other: &Self) -> Self {
        Self {
            root: Node::combine(&self.root, &other.root, 0, Combine::Union),
        }
    }

    fn intersection(&self, other: &Self) -> Self {
        Self {
            root: Node::combine(&self.root, &other.root, 0, Combine::Intersection),
        }
    }
}

impl KeySet<u16> for NibbleTrie {
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
        NibbleTrie::len(self)
    }
}

impl FromIterator<u16> for NibbleTrie {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut trie = Self::new();
        for value in iter {
            trie.insert(value);
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles_least_significant_first() {
        assert_eq!(nibble(0xABCD, 0), 0xD);
        assert_eq!(nibble(0xABCD, 3), 0xA);
    }

    #[test]
    fn test_insert_contains_erase() {
        let mut trie = NibbleTrie::new();
        assert!(trie.insert(0x1234));
        assert!(!trie.insert(0x1234));
        assert!(trie.contains(0x1234));
        assert!(!trie.contains(0x1235));
        assert!(trie.erase(0x1234));
        assert!(!trie.erase(0x1234));
        assert!(!trie.erase(0x9999));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_values_sorted() {
        let trie: NibbleTrie = [u16::MAX, 0, 17, 16].into_iter().collect();
        assert_eq!(trie.values(), vec![0, 16, 17, u16::MAX]);
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_union_with_sparse_side() {
        let a: NibbleTrie = [1, 2].into_iter().collect();
        let empty = NibbleTrie::new();
        assert_eq!(a.union(&empty).values(), vec![1, 2]);
        assert_eq!(empty.union(&a).values(), vec![1, 2]);
        assert!(a.intersection(&empty).is_empty());
    }

    #[test]
    fn test_intersection_prunes_empty_subtrees() {
        let a: NibbleTrie = [0x0001, 0x1000].into_iter().collect();
        let b: NibbleTrie = [0x0002, 0x1000].into_iter().collect();
        let both = a.intersection(&b);
        assert_eq!(both.values(), vec![0x1000]);

        let c: NibbleTrie = [0x0003].into_iter().collect();
        assert_eq!(a.intersection(&c), NibbleTrie::new());
    }
}
