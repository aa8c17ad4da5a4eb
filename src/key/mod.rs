//! key
//!
//! Key codec and generator.
//!
//! A key is an ASCII string with two parts:
//!
//! - an *integer part*: a head character (`a`-`z` on the high side, `A`-`Z`
//!   on the low side) that fixes how many digits follow it, plus those
//!   digits; the head encodes the key's magnitude class, so longer keys in
//!   a higher class still sort after shorter keys in a lower one ("a9" <
//!   "b00" < "b01")
//! - a *fractional part*: zero or more trailing digits refining the
//!   position within the class; canonical keys never end the fractional
//!   part with the alphabet's smallest digit, so no two distinct keys are
//!   equal-up-to-trailing-zeros
//!
//! This split is what allows unbounded insertion at either end without
//! rewriting existing keys: running off the top of a class extends the
//! integer part, repeated bisection extends the fractional part, and key
//! length grows only logarithmically with same-boundary insertions.
//!
//! # Modules
//!
//! - [`alphabet`]: the ordered digit set (default base-62)
//! - `codec`: integer increment/decrement and fractional midpoint math
//! - [`generator`]: `between(lower?, upper?)`, the public entry point
//!
//! # Example
//!
//! ```
//! use fracindex::key::{Key, KeyGenerator};
//!
//! let gen = KeyGenerator::default();
//! let first = gen.between(None, None).unwrap();
//! assert_eq!(first.as_str(), "a0");
//!
//! let next = gen.between(Some(&first), None).unwrap();
//! assert!(next > first);
//!
//! let mid = gen.between(Some(&first), Some(&next)).unwrap();
//! assert!(first < mid && mid < next);
//! ```

pub mod alphabet;
pub(crate) mod codec;
pub mod generator;

pub use alphabet::Alphabet;
pub use generator::KeyGenerator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from key and alphabet operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The lower bound was not strictly below the upper bound.
    ///
    /// This is always a caller bug: bounds are never silently reordered.
    #[error("invalid order: lower bound {lower:?} is not strictly below upper bound {upper:?}")]
    InvalidOrder {
        /// The offending lower bound.
        lower: String,
        /// The offending upper bound.
        upper: String,
    },

    /// A key string failed validation against the alphabet.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// An alphabet string failed validation.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// The key space below the minimum representable key is exhausted.
    #[error("key space exhausted below the minimum representable key")]
    RangeExhausted,
}

/// A validated fractional-index key.
///
/// Keys are immutable once constructed and compare by ordinary
/// lexicographic (codepoint) order, which by construction always equals
/// the intended item order. A key "a9" compares greater than "a" despite
/// being longer because the integer-part encoding guarantees it, not
/// because of any length-aware comparison.
///
/// Construction validates the string; invalid keys are unrepresentable,
/// including after serde deserialization (which validates against the
/// default base-62 alphabet - keys minted under a custom alphabet whose
/// digits fall outside base-62 will not round-trip through serde).
///
/// # Example
///
/// ```
/// use fracindex::Key;
///
/// let a = Key::new("a0").unwrap();
/// let b = Key::new("a0V").unwrap();
/// assert!(a < b);
///
/// // Invalid constructions fail at creation time
/// assert!(Key::new("").is_err());
/// assert!(Key::new("5").is_err());      // missing head character
/// assert!(Key::new("a00").is_err());    // fraction ends in smallest digit
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(String);

impl Key {
    /// Construct a key, validating against the default base-62 alphabet.
    pub fn new(s: impl Into<String>) -> Result<Self, KeyError> {
        Self::with_alphabet(s, &Alphabet::base62())
    }

    /// Construct a key, validating against the given alphabet.
    pub fn with_alphabet(s: impl Into<String>, alphabet: &Alphabet) -> Result<Self, KeyError> {
        let s = s.into();
        codec::validate(&s, alphabet)?;
        Ok(Key(s))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Internal constructor for strings the codec has already produced.
    ///
    /// Callers must guarantee the string is a canonical key.
    pub(crate) fn from_valid(s: String) -> Self {
        Key(s)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Key {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Key::new(s)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> String {
        key.0
    }
}
