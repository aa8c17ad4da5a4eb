//! accessor::memory
//!
//! Self-managed in-memory backend - the only one the core owns.
//!
//! # Design
//!
//! [`MemoryAccessor`] keeps a sorted set of keys behind a `Mutex`, so
//! shared readers stay sound; neighbor queries are range lookups on the
//! set and work for any probe key, present in the set or not.
//! [`MemoryIndexer`] pairs it with an [`Indexer`] and, unlike every other
//! variant, also *adds* each generated key to the set. Its `insert` takes
//! `&mut self`: the exclusive borrow is the single lock around each
//! insert that keeps resolution and mutation one atomic step.
//!
//! # Example
//!
//! ```
//! use fracindex::MemoryIndexer;
//!
//! let mut idx = MemoryIndexer::new();
//! let k1 = idx.insert(None, None).unwrap();
//! let k2 = idx.insert(Some(&k1), None).unwrap();
//! let k3 = idx.insert(None, Some(&k2)).unwrap();
//! assert_eq!(idx.keys(), vec![k1, k3, k2]);
//! ```

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::Mutex;

use super::{Accessor, IdentityMapping};
use crate::indexer::{IndexError, Indexer};
use crate::key::{Key, KeyError, KeyGenerator};

/// Accessor over an owned, sorted set of keys.
#[derive(Debug, Default)]
pub struct MemoryAccessor {
    keys: Mutex<BTreeSet<Key>>,
}

impl MemoryAccessor {
    /// Empty accessor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accessor seeded with existing keys, in any order.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        MemoryAccessor {
            keys: Mutex::new(keys.into_iter().collect()),
        }
    }

    /// Add a key to the set. Returns false if it was already present.
    pub fn add(&self, key: Key) -> bool {
        self.keys.lock().unwrap().insert(key)
    }

    /// Remove a key from the set. Returns false if it was absent.
    pub fn remove(&self, key: &Key) -> bool {
        self.keys.lock().unwrap().remove(key)
    }

    /// Whether the set contains `key`.
    pub fn contains(&self, key: &Key) -> bool {
        self.keys.lock().unwrap().contains(key)
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.lock().unwrap().is_empty()
    }

    /// Sorted snapshot of the set.
    pub fn snapshot(&self) -> Vec<Key> {
        self.keys.lock().unwrap().iter().cloned().collect()
    }
}

impl Accessor for MemoryAccessor {
    type Name = Key;
    type Error = Infallible;

    fn first(&self) -> Result<Option<Key>, Infallible> {
        Ok(self.keys.lock().unwrap().iter().next().cloned())
    }

    fn last(&self) -> Result<Option<Key>, Infallible> {
        Ok(self.keys.lock().unwrap().iter().next_back().cloned())
    }

    fn before(&self, name: &Key) -> Result<Option<Key>, Infallible> {
        Ok(self.keys.lock().unwrap().range(..name).next_back().cloned())
    }

    fn after(&self, name: &Key) -> Result<Option<Key>, Infallible> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .range((Excluded(name), Unbounded))
            .next()
            .cloned())
    }
}

/// Indexer that owns and manages its collection of keys.
///
/// Unusually, `insert` here both generates a key and adds it to the
/// owned set, so names and keys coincide ([`IdentityMapping`]).
#[derive(Debug)]
pub struct MemoryIndexer {
    inner: Indexer<MemoryAccessor, IdentityMapping>,
}

impl MemoryIndexer {
    /// Empty managed indexer with the default base-62 generator.
    pub fn new() -> Self {
        Self::with_keys([])
    }

    /// Managed indexer seeded with existing keys, in any order.
    pub fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        MemoryIndexer {
            inner: Indexer::new(MemoryAccessor::from_keys(keys), IdentityMapping),
        }
    }

    /// Managed indexer with a custom-alphabet generator.
    pub fn with_generator(generator: KeyGenerator) -> Self {
        MemoryIndexer {
            inner: Indexer::with_generator(MemoryAccessor::new(), IdentityMapping, generator),
        }
    }

    /// Generate a key between `after` and `before` and add it to the set.
    ///
    /// Resolution follows [`Indexer::insert`]; the exclusive borrow
    /// serializes the whole read-generate-add step against other inserts.
    pub fn insert(&mut self, after: Option<&Key>, before: Option<&Key>) -> Result<Key, KeyError> {
        let key = self.inner.insert(after, before).map_err(only_key)?;
        self.inner.accessor().add(key.clone());
        Ok(key)
    }

    /// Insert before every current key.
    pub fn insert_at_start(&mut self) -> Result<Key, KeyError> {
        let first = first_of(&self.inner);
        self.insert(None, first.as_ref())
    }

    /// Insert after every current key.
    pub fn insert_at_end(&mut self) -> Result<Key, KeyError> {
        let last = last_of(&self.inner);
        self.insert(last.as_ref(), None)
    }

    /// Number of managed keys.
    pub fn len(&self) -> usize {
        self.inner.accessor().len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.accessor().is_empty()
    }

    /// Sorted snapshot of the managed keys.
    pub fn keys(&self) -> Vec<Key> {
        self.inner.accessor().snapshot()
    }

    /// Iterate keys in order.
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.inner.iter().map(|r| match r {
            Ok(key) => key,
            Err(never) => match never {},
        })
    }
}

impl Default for MemoryIndexer {
    fn default() -> Self {
        Self::new()
    }
}

fn first_of(inner: &Indexer<MemoryAccessor, IdentityMapping>) -> Option<Key> {
    match inner.accessor().first() {
        Ok(first) => first,
        Err(never) => match never {},
    }
}

fn last_of(inner: &Indexer<MemoryAccessor, IdentityMapping>) -> Option<Key> {
    match inner.accessor().last() {
        Ok(last) => last,
        Err(never) => match never {},
    }
}

/// The in-memory accessor cannot fail, so only key errors remain.
fn only_key(err: IndexError<Infallible>) -> KeyError {
    match err {
        IndexError::Key(e) => e,
        IndexError::Backend(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        Key::new(s).unwrap()
    }

    #[test]
    fn neighbor_queries() {
        let acc = MemoryAccessor::from_keys([key("a0"), key("a2"), key("a4")]);
        assert_eq!(acc.first().unwrap(), Some(key("a0")));
        assert_eq!(acc.last().unwrap(), Some(key("a4")));
        assert_eq!(acc.before(&key("a2")).unwrap(), Some(key("a0")));
        assert_eq!(acc.after(&key("a2")).unwrap(), Some(key("a4")));
        assert_eq!(acc.before(&key("a0")).unwrap(), None);
        assert_eq!(acc.after(&key("a4")).unwrap(), None);
    }

    #[test]
    fn neighbor_queries_for_absent_probe() {
        // Probes between members resolve by rank, not membership.
        let acc = MemoryAccessor::from_keys([key("a0"), key("a4")]);
        assert_eq!(acc.before(&key("a2")).unwrap(), Some(key("a0")));
        assert_eq!(acc.after(&key("a2")).unwrap(), Some(key("a4")));
    }

    #[test]
    fn queries_are_idempotent() {
        let acc = MemoryAccessor::from_keys([key("a0"), key("a1")]);
        assert_eq!(acc.first().unwrap(), acc.first().unwrap());
        assert_eq!(acc.last().unwrap(), acc.last().unwrap());
        assert_eq!(
            acc.before(&key("a1")).unwrap(),
            acc.before(&key("a1")).unwrap()
        );
        assert_eq!(
            acc.after(&key("a0")).unwrap(),
            acc.after(&key("a0")).unwrap()
        );
    }

    #[test]
    fn add_remove_contains() {
        let acc = MemoryAccessor::new();
        assert!(acc.add(key("a0")));
        assert!(!acc.add(key("a0")));
        assert!(acc.contains(&key("a0")));
        assert!(acc.remove(&key("a0")));
        assert!(!acc.remove(&key("a0")));
        assert!(acc.is_empty());
    }

    #[test]
    fn empty_accessor() {
        let acc = MemoryAccessor::new();
        assert_eq!(acc.first().unwrap(), None);
        assert_eq!(acc.last().unwrap(), None);
        assert!(acc.is_empty());
    }

    #[test]
    fn managed_insert_scenario() {
        let mut idx = MemoryIndexer::new();
        let i1 = idx.insert(None, None).unwrap();
        assert!(i1.as_str().starts_with('a'));
        let i2 = idx.insert(Some(&i1), None).unwrap();
        assert!(i2 > i1);
        let i3 = idx.insert(None, Some(&i2)).unwrap();
        assert!(i3 < i2 && i3 > i1);
        let i4 = idx.insert(Some(&i3), Some(&i2)).unwrap();
        assert!(i4 > i3 && i4 < i2);
        let i5 = idx.insert(None, None).unwrap();
        assert!(i5 > i2);
        assert_eq!(idx.len(), 5);
        let i6 = idx.insert_at_start().unwrap();
        assert!(i6 < i1);
        assert_eq!(idx.keys(), vec![i6, i1, i3, i4, i2, i5]);
    }

    #[test]
    fn seeded_with_unsorted_keys() {
        let seed = [key("a2"), key("a0"), key("a1")];
        let idx = MemoryIndexer::with_keys(seed);
        assert_eq!(idx.keys(), vec![key("a0"), key("a1"), key("a2")]);
    }

    #[test]
    fn seeded_inserts_respect_existing_order() {
        let mut idx = MemoryIndexer::with_keys([key("a0"), key("a1"), key("a2")]);
        let lo = idx.insert_at_start().unwrap();
        assert!(lo < key("a0"));
        let hi = idx.insert_at_end().unwrap();
        assert!(hi > key("a2"));
        let mid = idx.insert(Some(&key("a0")), None).unwrap();
        assert!(key("a0") < mid && mid < key("a1"));
    }

    #[test]
    fn iter_matches_keys() {
        let mut idx = MemoryIndexer::new();
        for _ in 0..4 {
            idx.insert(None, None).unwrap();
        }
        let via_iter: Vec<Key> = idx.iter().collect();
        assert_eq!(via_iter, idx.keys());
    }
}
