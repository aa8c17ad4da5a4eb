//! Fracindex - fractional indexing for ordered collections
//!
//! Fracindex generates short, totally ordered string keys that sort
//! lexicographically between two existing keys, so an item can be inserted
//! anywhere in an ordered collection without renumbering its neighbors.
//! This is the technique behind drag-and-drop reordering and CRDT list
//! positions: insert cost is O(1) and independent of collection size.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`key`] - Key codec and generator (alphabet, ordering, midpoint math)
//! - [`accessor`] - The `Accessor` capability contract plus the in-memory,
//!   sqlite, and directory backends that implement it
//! - [`indexer`] - Orchestrates insert operations: resolves after/before
//!   names into key bounds and delegates to the generator
//!
//! # Correctness Invariants
//!
//! 1. Key order is ordinary lexicographic order, always equal to item order
//! 2. `between(a, b)` returns a key strictly inside its bounds, or fails
//!    with [`KeyError::InvalidOrder`] - bounds are never silently reordered
//! 3. The indexer never mutates the backing collection; the caller persists
//!    the generated key (the managed in-memory variant is the one exception)
//! 4. Invalid keys and alphabets are unrepresentable after construction
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
//! assert!(k1 < k3 && k3 < k2);
//! assert_eq!(idx.keys(), vec![k1, k3, k2]);
//! ```

pub mod accessor;
pub mod indexer;
pub mod key;

pub use accessor::dir::{DirAccessor, DirIndexer};
pub use accessor::memory::{MemoryAccessor, MemoryIndexer};
#[cfg(feature = "sqlite")]
pub use accessor::sqlite::{SqliteAccessor, SqliteIndexer};
pub use accessor::{Accessor, IdentityMapping, KeyMapping};
pub use indexer::{IndexError, Indexer, Names};
pub use key::{Alphabet, Key, KeyError, KeyGenerator};
