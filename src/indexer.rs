//! indexer
//!
//! Orchestrates insert operations over any [`Accessor`].
//!
//! # Design
//!
//! An [`Indexer`] does not modify the collection it indexes. `insert` only
//! *generates* a key; the caller persists the new item under a name
//! derived from it (the managed in-memory variant in
//! [`crate::accessor::memory`] is the one exception). The indexer holds no
//! mutable state beyond its accessor and mapping, so it is safe to share
//! across threads as a coordinator; snapshot consistency of a single
//! insert is entirely the accessor's contract.
//!
//! # Resolution
//!
//! `insert(after, before)` resolves its bounds by case:
//!
//! | after  | before | resolution                          |
//! |--------|--------|-------------------------------------|
//! | absent | absent | `after = accessor.last()`           |
//! | absent | given  | `after = accessor.before(before)`   |
//! | given  | absent | `before = accessor.after(after)`    |
//! | given  | given  | used as-is                          |
//!
//! The resolved names are mapped to keys and handed to
//! [`KeyGenerator::between`]. Two lenient paths are deliberate and
//! documented rather than validated away:
//!
//! - a supplied name the mapping cannot resolve (deleted concurrently,
//!   or outside the ordering) degrades to an absent bound
//! - when both `after` and `before` are given, their actual adjacency in
//!   the backend is *not* checked; the caller asserts the relationship,
//!   and a reversed pair surfaces as [`KeyError::InvalidOrder`]

use thiserror::Error;

use crate::accessor::{Accessor, KeyMapping};
use crate::key::{Key, KeyError, KeyGenerator};

/// Errors from indexer operations.
#[derive(Debug, Error)]
pub enum IndexError<E> {
    /// Key generation failed (invalid order or malformed bound key).
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The backend failed; the underlying error passes through unmodified.
    #[error(transparent)]
    Backend(E),
}

/// Generates insertion keys for an ordered collection.
///
/// Generic over the [`Accessor`] backend and the [`KeyMapping`] that
/// connects the backend's names to keys.
///
/// # Example
///
/// ```
/// use fracindex::{IdentityMapping, Indexer, MemoryAccessor};
///
/// let accessor = MemoryAccessor::new();
/// let idx = Indexer::new(accessor, IdentityMapping);
///
/// // Empty collection, no bounds: the canonical starting key.
/// let k = idx.insert(None, None).unwrap();
/// assert_eq!(k.as_str(), "a0");
/// ```
#[derive(Debug)]
pub struct Indexer<A, M> {
    accessor: A,
    mapping: M,
    generator: KeyGenerator,
}

impl<A, M> Indexer<A, M>
where
    A: Accessor,
    M: KeyMapping<A::Name>,
{
    /// Indexer over `accessor` with the default base-62 generator.
    pub fn new(accessor: A, mapping: M) -> Self {
        Self::with_generator(accessor, mapping, KeyGenerator::default())
    }

    /// Indexer with a custom-alphabet generator.
    pub fn with_generator(accessor: A, mapping: M, generator: KeyGenerator) -> Self {
        Indexer {
            accessor,
            mapping,
            generator,
        }
    }

    /// The underlying accessor.
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// The key generator in use.
    pub fn generator(&self) -> &KeyGenerator {
        &self.generator
    }

    /// Generate a key for an item inserted after `after` and/or before
    /// `before`.
    ///
    /// With neither bound given, inserts at the end (or produces the
    /// canonical starting key if the collection is empty). See the module
    /// docs for the full resolution table and the lenient paths.
    ///
    /// # Errors
    ///
    /// - [`IndexError::Key`] with [`KeyError::InvalidOrder`] if the
    ///   resolved lower key is not strictly below the upper key (caller
    ///   bug, never silently corrected)
    /// - [`IndexError::Backend`] if an accessor read fails
    pub fn insert(
        &self,
        after: Option<&A::Name>,
        before: Option<&A::Name>,
    ) -> Result<Key, IndexError<A::Error>> {
        let (after, before) = match (after, before) {
            (None, None) => (self.accessor.last().map_err(IndexError::Backend)?, None),
            (None, Some(b)) => (
                self.accessor.before(b).map_err(IndexError::Backend)?,
                Some(b.clone()),
            ),
            (Some(a), None) => (
                Some(a.clone()),
                self.accessor.after(a).map_err(IndexError::Backend)?,
            ),
            (Some(a), Some(b)) => (Some(a.clone()), Some(b.clone())),
        };
        let lower = after.as_ref().and_then(|n| self.mapping.key_for(n));
        let upper = before.as_ref().and_then(|n| self.mapping.key_for(n));
        Ok(self.generator.between(lower.as_ref(), upper.as_ref())?)
    }

    /// Generate a key that sorts before every current item.
    pub fn insert_at_start(&self) -> Result<Key, IndexError<A::Error>> {
        let first = self.accessor.first().map_err(IndexError::Backend)?;
        self.insert(None, first.as_ref())
    }

    /// Generate a key that sorts after every current item.
    pub fn insert_at_end(&self) -> Result<Key, IndexError<A::Error>> {
        let last = self.accessor.last().map_err(IndexError::Backend)?;
        self.insert(last.as_ref(), None)
    }

    /// Iterate item names in key order.
    ///
    /// Lazy, finite, forward-only, and restartable - each call starts a
    /// fresh pass from `first()`. Holds no lock between steps, so an item
    /// inserted by a concurrent writer mid-iteration may or may not
    /// appear; iteration over a mutating backend sees a torn view.
    pub fn iter(&self) -> Names<'_, A> {
        Names {
            accessor: &self.accessor,
            cursor: Cursor::Start,
        }
    }
}

/// Forward iterator over item names; see [`Indexer::iter`].
///
/// Yields `Err` once and then terminates if a backend read fails.
pub struct Names<'a, A: Accessor> {
    accessor: &'a A,
    cursor: Cursor<A::Name>,
}

enum Cursor<N> {
    Start,
    At(N),
    Done,
}

impl<A: Accessor> Iterator for Names<'_, A> {
    type Item = Result<A::Name, A::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let fetched = match &self.cursor {
            Cursor::Start => self.accessor.first(),
            Cursor::At(name) => self.accessor.after(name),
            Cursor::Done => return None,
        };
        match fetched {
            Ok(Some(name)) => {
                self.cursor = Cursor::At(name.clone());
                Some(Ok(name))
            }
            Ok(None) => {
                self.cursor = Cursor::Done;
                None
            }
            Err(err) => {
                self.cursor = Cursor::Done;
                Some(Err(err))
            }
        }
    }
}

impl<A: Accessor> std::iter::FusedIterator for Names<'_, A> {}
