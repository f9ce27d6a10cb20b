//! LRU (Least Recently Used) cache engine
//!
//! Entries live in a slot arena (`Vec<Option<Node>>`) and are threaded into a
//! doubly-linked recency list by index, head = most recently used. A key index
//! maps each key to its slot, so lookup, promotion and eviction are all O(1).
//! Vacated slots go on a free list and are reused before the arena grows.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;

use crate::error::{Error, Result};

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// What a call to [`LruCache::put`] did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<K, V> {
    /// Key was new and there was room for it
    Inserted,
    /// Key was already cached; carries the value it replaced
    Updated(V),
    /// Key was new and the least recently used entry was evicted for it
    Evicted {
        /// Key of the evicted entry
        key: K,
        /// Value of the evicted entry
        value: V,
    },
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V, S = RandomState> {
    map: HashMap<K, usize, S>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// Fails with [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Create a new LRU cache that hashes keys with `hasher`
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, hasher),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a value without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Check whether a key is cached without touching its recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair into the cache
    ///
    /// An existing key is updated in place and promoted. A new key is linked
    /// at the head; if the cache is full the tail entry is evicted first.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                let old = std::mem::replace(&mut node.value, value);
                self.move_to_front(idx);
                return PutOutcome::Updated(old);
            }
            debug_assert!(false, "key index points at vacant slot {}", idx);
            self.map.remove(&key);
        }

        let outcome = if self.map.len() >= self.capacity {
            match self.evict() {
                Some((key, value)) => PutOutcome::Evicted { key, value },
                None => PutOutcome::Inserted,
            }
        } else {
            PutOutcome::Inserted
        };

        let idx = self.alloc_node(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.map.insert(key, idx);

        outcome
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        Some(node.value)
    }

    /// The entry that the next eviction would remove
    pub fn lru(&self) -> Option<(&K, &V)> {
        let node = self.nodes[self.tail?].as_ref()?;
        Some((&node.key, &node.value))
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.map.len(),
        }
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries, fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        if let Some(head_idx) = old_head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &mut self.nodes[idx] {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let node = self.nodes[tail_idx].take()?;
        self.map.remove(&node.key);
        self.free_list.push(tail_idx);
        Some((node.key, node.value))
    }

    fn alloc_node(&mut self, node: Node<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    /// Walk both structures and panic on any disagreement between them
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.nodes[idx].as_ref().expect("linked slot is vacant");
            assert_eq!(node.prev, prev, "broken back link at slot {}", idx);
            assert_eq!(self.map.get(&node.key), Some(&idx), "index disagrees with list");
            assert!(seen.insert(idx), "cycle through slot {}", idx);
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(self.tail, prev, "tail is not the last linked slot");
        assert_eq!(seen.len(), self.map.len(), "orphaned index entries");
        assert!(self.map.len() <= self.capacity);

        let free: HashSet<_> = self.free_list.iter().copied().collect();
        assert_eq!(free.len(), self.free_list.len(), "slot freed twice");
        assert!(free.iter().all(|&idx| self.nodes[idx].is_none()));
        assert_eq!(self.nodes.len(), self.map.len() + self.free_list.len());
        assert!(self.nodes.len() <= self.capacity);
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over cache entries, most recently used first
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes[self.next?].as_ref()?;
        self.next = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u8, u16),
        Get(u8),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..16, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            2 => (0u8..16).prop_map(Op::Get),
            1 => (0u8..16).prop_map(Op::Remove),
        ]
    }

    /// Reference model: front = most recently used
    fn touch(model: &mut VecDeque<(u8, u16)>, key: u8) -> Option<(u8, u16)> {
        let pos = model.iter().position(|(k, _)| *k == key)?;
        let entry = model.remove(pos)?;
        model.push_front(entry);
        Some(entry)
    }

    proptest! {
        /// Property: cache tracks a naive move-to-front list exactly
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 1usize..8,
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut cache = LruCache::new(capacity).unwrap();
            let mut model: VecDeque<(u8, u16)> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        let outcome = cache.put(k, v);
                        if let Some((_, old)) = touch(&mut model, k) {
                            model[0].1 = v;
                            prop_assert_eq!(outcome, PutOutcome::Updated(old));
                        } else {
                            let evicted = if model.len() == capacity { model.pop_back() } else { None };
                            model.push_front((k, v));
                            match evicted {
                                Some((key, value)) => {
                                    prop_assert_eq!(outcome, PutOutcome::Evicted { key, value });
                                }
                                None => {
                                    prop_assert_eq!(outcome, PutOutcome::Inserted);
                                }
                            }
                        }
                    }
                    Op::Get(k) => {
                        let expected = touch(&mut model, k).map(|(_, v)| v);
                        prop_assert_eq!(cache.get(&k).copied(), expected);
                    }
                    Op::Remove(k) => {
                        let expected = model
                            .iter()
                            .position(|(key, _)| *key == k)
                            .and_then(|pos| model.remove(pos))
                            .map(|(_, v)| v);
                        prop_assert_eq!(cache.remove(&k), expected);
                    }
                }

                cache.check_invariants();
                let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                let expected: Vec<(u8, u16)> = model.iter().copied().collect();
                prop_assert_eq!(actual, expected);
            }
        }

        /// Property: N distinct puts leave exactly the last min(N, c) keys
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_bounded_size_keeps_most_recent(
            capacity in 1usize..10,
            n in 0u32..50
        ) {
            let mut cache = LruCache::new(capacity).unwrap();
            for k in 0..n {
                cache.put(k, ());
            }

            prop_assert_eq!(cache.len(), (n as usize).min(capacity));
            let kept: Vec<u32> = cache.iter().map(|(k, _)| *k).collect();
            let expected: Vec<u32> = (0..n).rev().take(capacity).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
