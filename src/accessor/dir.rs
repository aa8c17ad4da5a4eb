//! accessor::dir
//!
//! Accessor over an ordering reconstructed from directory entry names.
//!
//! # Design
//!
//! Every query rescans the directory: entries whose names the
//! [`KeyMapping`] maps to `Some(key)` form the ordered sequence, all
//! other entries are invisible. No state is cached across calls, so each
//! answer reflects the directory as it is right now, including renames
//! performed by other processes. A cache would trade that correctness for
//! speed and reintroduce the concurrent-writer race in a worse form, so
//! the rescan is deliberate.
//!
//! An unreadable directory surfaces as the underlying `io::Error`,
//! unmodified - whether to treat that as an empty ordering is the
//! embedder's decision, not this module's.
//!
//! # Example
//!
//! ```no_run
//! use fracindex::{DirAccessor, Key};
//!
//! // Files named "<key>--<title>" participate in the ordering.
//! let mapping = |name: &String| -> Option<Key> {
//!     let (key, _title) = name.split_once("--")?;
//!     Key::new(key).ok()
//! };
//! let idx = DirAccessor::new("notes", mapping).indexer();
//! let key = idx.insert(None, None).unwrap();
//! std::fs::File::create(format!("notes/{key}--draft.md")).unwrap();
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Accessor, KeyMapping};
use crate::indexer::Indexer;
use crate::key::Key;

/// Indexer over a directory-backed accessor.
///
/// The same mapping drives both ends: the accessor uses it to filter and
/// order entries, the indexer to turn neighbor names back into keys.
pub type DirIndexer<M> = Indexer<DirAccessor<M>, M>;

/// Neighbor queries over the eligible entries of one directory.
#[derive(Debug, Clone)]
pub struct DirAccessor<M> {
    dir: PathBuf,
    mapping: M,
}

impl<M: KeyMapping<String>> DirAccessor<M> {
    /// Accessor over `dir`; `mapping` decides which entry names belong to
    /// the ordering and what key each one carries.
    pub fn new(dir: impl Into<PathBuf>, mapping: M) -> Self {
        DirAccessor {
            dir: dir.into(),
            mapping,
        }
    }

    /// The directory being scanned.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Indexer sharing this accessor's mapping.
    pub fn indexer(self) -> DirIndexer<M>
    where
        M: Clone,
    {
        let mapping = self.mapping.clone();
        Indexer::new(self, mapping)
    }

    /// Scan the directory and map eligible entry names by key.
    ///
    /// The mapping's injectivity contract makes this a bijection; if two
    /// entries ever map to the same key, the later one wins the slot and
    /// the ordering is undefined, as documented on [`KeyMapping`].
    fn key_names(&self) -> io::Result<BTreeMap<Key, String>> {
        let mut by_key = BTreeMap::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if let Some(key) = self.mapping.key_for(&name) {
                by_key.insert(key, name);
            }
        }
        Ok(by_key)
    }
}

impl<M: KeyMapping<String>> Accessor for DirAccessor<M> {
    type Name = String;
    type Error = io::Error;

    fn first(&self) -> Result<Option<String>, io::Error> {
        Ok(self.key_names()?.into_iter().next().map(|(_, name)| name))
    }

    fn last(&self) -> Result<Option<String>, io::Error> {
        Ok(self
            .key_names()?
            .into_iter()
            .next_back()
            .map(|(_, name)| name))
    }

    fn before(&self, name: &String) -> Result<Option<String>, io::Error> {
        let key = match self.mapping.key_for(name) {
            Some(key) => key,
            None => return Ok(None),
        };
        Ok(self
            .key_names()?
            .range(..&key)
            .next_back()
            .map(|(_, name)| name.clone()))
    }

    fn after(&self, name: &String) -> Result<Option<String>, io::Error> {
        let key = match self.mapping.key_for(name) {
            Some(key) => key,
            None => return Ok(None),
        };
        use std::ops::Bound::{Excluded, Unbounded};
        Ok(self
            .key_names()?
            .range((Excluded(&key), Unbounded))
            .next()
            .map(|(_, name)| name.clone()))
    }
}
