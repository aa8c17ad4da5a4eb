//! key::alphabet
//!
//! The ordered digit set keys are written in.
//!
//! An alphabet fixes the digits that appear after a key's head character,
//! in both the integer and fractional parts. Digits must be ASCII and in
//! strictly ascending codepoint order so that digit order and string order
//! coincide; that identity is what makes lexicographic key comparison
//! correct. The head characters (`A`-`Z`, `a`-`z`) are not part of the
//! alphabet - they encode magnitude class and are fixed by the codec.

use serde::{Deserialize, Serialize};

use super::KeyError;

/// The default 62-symbol digit set, in ASCII codepoint order.
pub const BASE_62: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// A validated, ordered digit set.
///
/// # Example
///
/// ```
/// use fracindex::Alphabet;
///
/// let base62 = Alphabet::base62();
/// assert_eq!(base62.len(), 62);
///
/// let base10 = Alphabet::new("0123456789").unwrap();
/// assert_eq!(base10.len(), 10);
///
/// // Digits must be strictly ascending
/// assert!(Alphabet::new("0198").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    digits: Box<[u8]>,
}

impl Alphabet {
    /// Construct an alphabet from its digit string.
    ///
    /// Requires at least two ASCII symbols in strictly ascending codepoint
    /// order (ascending order is what keeps digit order equal to string
    /// order, the invariant key comparison relies on).
    pub fn new(digits: &str) -> Result<Self, KeyError> {
        if !digits.is_ascii() {
            return Err(KeyError::InvalidAlphabet(
                "digits must be ASCII".to_string(),
            ));
        }
        let bytes = digits.as_bytes();
        if bytes.len() < 2 {
            return Err(KeyError::InvalidAlphabet(
                "at least two digits required".to_string(),
            ));
        }
        if !bytes.windows(2).all(|w| w[0] < w[1]) {
            return Err(KeyError::InvalidAlphabet(format!(
                "digits must be in strictly ascending codepoint order: {digits:?}"
            )));
        }
        Ok(Alphabet {
            digits: bytes.to_vec().into_boxed_slice(),
        })
    }

    /// The default base-62 alphanumeric alphabet.
    pub fn base62() -> Self {
        Alphabet {
            digits: BASE_62.as_bytes().to_vec().into_boxed_slice(),
        }
    }

    /// Number of digits in the alphabet (the base).
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false: construction requires at least two digits.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The digit string.
    pub fn as_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.digits).unwrap_or_default()
    }

    /// The smallest digit.
    pub(crate) fn smallest(&self) -> u8 {
        self.digits[0]
    }

    /// The largest digit.
    pub(crate) fn largest(&self) -> u8 {
        self.digits[self.digits.len() - 1]
    }

    /// The digit at `index`. Panics if out of range; callers index with
    /// values bounded by `len()`.
    pub(crate) fn digit(&self, index: usize) -> u8 {
        self.digits[index]
    }

    /// Position of `d` in the alphabet, or `None` if it is not a digit.
    pub(crate) fn index_of(&self, d: u8) -> Option<usize> {
        self.digits.iter().position(|&x| x == d)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::base62()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Alphabet::new(&s)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> String {
        alphabet.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base62_shape() {
        let a = Alphabet::base62();
        assert_eq!(a.len(), 62);
        assert_eq!(a.smallest(), b'0');
        assert_eq!(a.largest(), b'z');
        assert_eq!(a.index_of(b'V'), Some(31));
        assert_eq!(a.index_of(b'!'), None);
    }

    #[test]
    fn default_is_base62() {
        assert_eq!(Alphabet::default(), Alphabet::base62());
    }

    #[test]
    fn rejects_unsorted_and_short() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("0").is_err());
        assert!(Alphabet::new("0198").is_err());
        assert!(Alphabet::new("00").is_err()); // duplicates are not ascending
        assert!(Alphabet::new("0é9").is_err());
    }

    #[test]
    fn accepts_base10() {
        let a = Alphabet::new("0123456789").unwrap();
        assert_eq!(a.len(), 10);
        assert_eq!(a.largest(), b'9');
    }

    #[test]
    fn serde_roundtrip() {
        let a = Alphabet::new("0123456789").unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"0123456789\"");
        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
