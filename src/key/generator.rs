//! key::generator
//!
//! `between(lower?, upper?)` - the public key-generation entry point.
//!
//! # Design
//!
//! A [`KeyGenerator`] holds only its [`Alphabet`]; `between` is a pure
//! function of its two bounds, so repeated calls with equal arguments
//! return equal keys and the generator is safe to share across threads
//! without synchronization.
//!
//! Bound handling:
//!
//! - both absent: the canonical starting key (`"a0"` under base-62), so a
//!   freshly empty collection's first insertion is deterministic
//! - lower only: the next integer part, falling back to fractional
//!   extension at the top magnitude class - there is no upper limit
//! - upper only: the upper bound's own integer part if that already sorts
//!   below it, otherwise the previous integer part
//! - both present: fractional midpoint when the integer parts agree,
//!   otherwise the next integer part when it still fits under the upper
//!   bound
//!
//! A lower bound not strictly below the upper bound is a caller bug and
//! fails with [`KeyError::InvalidOrder`]; it is never silently corrected.

use super::codec;
use super::{Alphabet, Key, KeyError};

/// Stateless key generator over a fixed alphabet.
///
/// # Example
///
/// ```
/// use fracindex::KeyGenerator;
///
/// let gen = KeyGenerator::default();
/// let a = gen.between(None, None).unwrap();
/// let c = gen.between(Some(&a), None).unwrap();
/// let b = gen.between(Some(&a), Some(&c)).unwrap();
/// assert!(a < b && b < c);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyGenerator {
    alphabet: Alphabet,
}

impl KeyGenerator {
    /// Generator over a custom alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        KeyGenerator { alphabet }
    }

    /// The alphabet this generator writes keys in.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Generate a key strictly between the two bounds.
    ///
    /// An absent bound is open: `between(Some(a), None)` is greater than
    /// `a`, `between(None, Some(b))` is smaller than `b`, and
    /// `between(None, None)` is the canonical starting key.
    ///
    /// # Errors
    ///
    /// - [`KeyError::InvalidOrder`] if both bounds are present and
    ///   `lower >= upper`
    /// - [`KeyError::InvalidKey`] if a bound does not validate against
    ///   this generator's alphabet (e.g. a key minted elsewhere)
    pub fn between(&self, lower: Option<&Key>, upper: Option<&Key>) -> Result<Key, KeyError> {
        if let Some(a) = lower {
            codec::validate(a.as_str(), &self.alphabet)?;
        }
        if let Some(b) = upper {
            codec::validate(b.as_str(), &self.alphabet)?;
        }
        if let (Some(a), Some(b)) = (lower, upper) {
            if a >= b {
                return Err(KeyError::InvalidOrder {
                    lower: a.as_str().to_string(),
                    upper: b.as_str().to_string(),
                });
            }
        }

        match (lower, upper) {
            (None, None) => Ok(Key::from_valid(format!(
                "a{}",
                self.alphabet.smallest() as char
            ))),
            (None, Some(b)) => self.below(b),
            (Some(a), None) => self.above(a),
            (Some(a), Some(b)) => self.inside(a, b),
        }
    }

    fn above(&self, a: &Key) -> Result<Key, KeyError> {
        let ia = codec::integer_part(a.as_str())?;
        let fa = &a.as_str()[ia.len()..];
        match codec::increment_integer(ia, &self.alphabet)? {
            Some(next) => Ok(Key::from_valid(next)),
            // Top magnitude class: extend the fraction instead.
            None => {
                let tail = codec::midpoint(fa, None, &self.alphabet)?;
                Ok(Key::from_valid(format!("{ia}{tail}")))
            }
        }
    }

    fn below(&self, b: &Key) -> Result<Key, KeyError> {
        let ib = codec::integer_part(b.as_str())?;
        let fb = &b.as_str()[ib.len()..];
        if ib == codec::min_integer(&self.alphabet) {
            // Bottom magnitude class: bisect the fraction toward zero.
            let tail = codec::midpoint("", Some(fb), &self.alphabet)?;
            return Ok(Key::from_valid(format!("{ib}{tail}")));
        }
        if ib < b.as_str() {
            // b carries a fraction, so its bare integer part sorts below it.
            return Ok(Key::from_valid(ib.to_string()));
        }
        match codec::decrement_integer(ib, &self.alphabet)? {
            Some(prev) => Ok(Key::from_valid(prev)),
            None => Err(KeyError::RangeExhausted),
        }
    }

    fn inside(&self, a: &Key, b: &Key) -> Result<Key, KeyError> {
        let ia = codec::integer_part(a.as_str())?;
        let fa = &a.as_str()[ia.len()..];
        let ib = codec::integer_part(b.as_str())?;
        let fb = &b.as_str()[ib.len()..];
        if ia == ib {
            let tail = codec::midpoint(fa, Some(fb), &self.alphabet)?;
            return Ok(Key::from_valid(format!("{ia}{tail}")));
        }
        match codec::increment_integer(ia, &self.alphabet)? {
            Some(next) if next.as_str() < b.as_str() => Ok(Key::from_valid(next)),
            // The next integer part would overshoot b; stay in a's class
            // and extend its fraction.
            _ => {
                let tail = codec::midpoint(fa, None, &self.alphabet)?;
                Ok(Key::from_valid(format!("{ia}{tail}")))
            }
        }
    }
}
