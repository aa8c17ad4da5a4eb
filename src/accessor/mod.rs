//! accessor
//!
//! The capability contract over ordered collections, plus its backends.
//!
//! # Design
//!
//! An [`Accessor`] answers four neighbor queries - `first`, `last`,
//! `before`, `after` - in terms of item *names*, the backend's own
//! identifiers (a row id, a file name, a key). Absence is an explicit
//! `Ok(None)`, never an error; backend I/O failures pass through the
//! associated `Error` type unwrapped, because the core cannot tell a
//! transient failure from a permanent one.
//!
//! The four reads must reflect a single consistent snapshot of collection
//! order for the duration of one insert. Backends that cannot guarantee
//! this (concurrent writers on a shared table or directory) document the
//! race instead of papering over it; see the per-backend modules.
//!
//! # Modules
//!
//! - [`memory`]: self-managed sorted set, the only backend the core owns
//! - `sqlite`: MIN/MAX queries over a caller-named table and column
//!   (requires the `sqlite` feature)
//! - [`dir`]: ordering reconstructed from directory entry names

pub mod dir;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::key::Key;

/// Read-only neighbor queries over an ordered collection.
///
/// Implementations must keep `first`/`last`/`before`/`after` consistent
/// with a single total order - the lexicographic order of the keys their
/// names map to. No ordering guarantee is carried across separate calls
/// beyond what the backend's storage provides.
pub trait Accessor {
    /// Backend-specific item identifier.
    type Name: Clone;

    /// Backend I/O error, propagated unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name of the item with the smallest key, or `None` if empty.
    fn first(&self) -> Result<Option<Self::Name>, Self::Error>;

    /// Name of the item with the largest key, or `None` if empty.
    fn last(&self) -> Result<Option<Self::Name>, Self::Error>;

    /// Name of the item immediately preceding `name` in key order, or
    /// `None` if `name` is first or does not resolve to a position.
    fn before(&self, name: &Self::Name) -> Result<Option<Self::Name>, Self::Error>;

    /// Name of the item immediately following `name` in key order, or
    /// `None` if `name` is last or does not resolve to a position.
    fn after(&self, name: &Self::Name) -> Result<Option<Self::Name>, Self::Error>;
}

/// Strategy mapping item names to keys.
///
/// The mapping must be injective and order-preserving where defined:
/// if `key_for(x) < key_for(y)` then `x` precedes `y` in the collection.
/// That contract is a precondition, not enforced at runtime - a
/// non-monotonic mapping yields undefined orderings. Names outside the
/// managed ordering map to `None`.
///
/// Any `Fn(&N) -> Option<Key>` closure is a mapping:
///
/// ```
/// use fracindex::{Key, KeyMapping};
///
/// let suffixed = |name: &String| -> Option<Key> {
///     Key::new(name.strip_suffix("--item")?).ok()
/// };
/// assert!(suffixed.key_for(&"a0--item".to_string()).is_some());
/// assert!(suffixed.key_for(&"readme.txt".to_string()).is_none());
/// ```
pub trait KeyMapping<N> {
    /// The key for `name`, or `None` if the name is not part of the
    /// ordered sequence.
    fn key_for(&self, name: &N) -> Option<Key>;
}

impl<N, F> KeyMapping<N> for F
where
    F: Fn(&N) -> Option<Key>,
{
    fn key_for(&self, name: &N) -> Option<Key> {
        self(name)
    }
}

/// The default mapping: the name *is* the key.
///
/// Parses string-like names as keys under the default alphabet; names
/// that do not parse are outside the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityMapping;

impl KeyMapping<String> for IdentityMapping {
    fn key_for(&self, name: &String) -> Option<Key> {
        Key::new(name.as_str()).ok()
    }
}

impl KeyMapping<Key> for IdentityMapping {
    fn key_for(&self, name: &Key) -> Option<Key> {
        Some(name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_mapping_parses_key_names() {
        assert_eq!(
            IdentityMapping.key_for(&"a0".to_string()),
            Some(Key::new("a0").unwrap())
        );
        assert_eq!(IdentityMapping.key_for(&"not a key".to_string()), None);
    }

    #[test]
    fn identity_mapping_on_keys_is_clone() {
        let k = Key::new("a0V").unwrap();
        assert_eq!(IdentityMapping.key_for(&k), Some(k));
    }

    #[test]
    fn closures_are_mappings() {
        let mapping = |name: &String| Key::new(name.split("--").next()?).ok();
        assert_eq!(
            mapping.key_for(&"a0--note.md".to_string()),
            Some(Key::new("a0").unwrap())
        );
        assert_eq!(mapping.key_for(&"--".to_string()), None);
    }
}
