//! key::codec
//!
//! Integer-part and fractional-part arithmetic for keys.
//!
//! The head character of a key selects its magnitude class: `a`-`z` on the
//! high side with integer lengths 2..=27, `A`-`Z` mirrored on the low side.
//! Within a class the integer digits count in the alphabet's base;
//! crossing a class boundary lengthens the integer part going up and
//! shortens it going down, which keeps lexicographic order equal to
//! numeric order across classes.
//!
//! Fractional parts are canonical: they never end in the alphabet's
//! smallest digit, so every position has exactly one spelling and
//! `midpoint` can always return the shortest string strictly between its
//! arguments.

use super::{Alphabet, KeyError};

/// Integer-part length (head included) selected by a head character.
pub(crate) fn head_len(head: u8) -> Option<usize> {
    match head {
        b'a'..=b'z' => Some((head - b'a') as usize + 2),
        b'A'..=b'Z' => Some((b'Z' - head) as usize + 2),
        _ => None,
    }
}

/// The smallest representable integer part: head `A` with all digits at
/// the alphabet minimum. Keys may extend it fractionally, but nothing
/// sorts below it.
pub(crate) fn min_integer(alphabet: &Alphabet) -> String {
    let mut s = String::with_capacity(27);
    s.push('A');
    for _ in 0..26 {
        s.push(alphabet.smallest() as char);
    }
    s
}

fn digit_index(alphabet: &Alphabet, d: u8) -> Result<usize, KeyError> {
    alphabet.index_of(d).ok_or_else(|| {
        KeyError::InvalidKey(format!("'{}' is not a digit of the alphabet", d as char))
    })
}

/// Split off the integer part of a key string.
pub(crate) fn integer_part(key: &str) -> Result<&str, KeyError> {
    let head = *key
        .as_bytes()
        .first()
        .ok_or_else(|| KeyError::InvalidKey("empty key".to_string()))?;
    let len = head_len(head)
        .ok_or_else(|| KeyError::InvalidKey(format!("invalid head character in {key:?}")))?;
    if len > key.len() {
        return Err(KeyError::InvalidKey(format!(
            "truncated integer part in {key:?}"
        )));
    }
    Ok(&key[..len])
}

/// Validate a key string against an alphabet.
///
/// Rejects non-ASCII strings, malformed integer parts, digits outside the
/// alphabet, fractional parts ending in the smallest digit, and the
/// absolute minimum key (nothing can be generated below it).
pub(crate) fn validate(key: &str, alphabet: &Alphabet) -> Result<(), KeyError> {
    if !key.is_ascii() {
        return Err(KeyError::InvalidKey(format!("non-ASCII key {key:?}")));
    }
    let integer = integer_part(key)?;
    for &d in &key.as_bytes()[1..] {
        digit_index(alphabet, d)?;
    }
    let fraction = &key.as_bytes()[integer.len()..];
    if fraction.last() == Some(&alphabet.smallest()) {
        return Err(KeyError::InvalidKey(format!(
            "fractional part of {key:?} ends in the smallest digit"
        )));
    }
    if fraction.is_empty() && key == min_integer(alphabet) {
        return Err(KeyError::InvalidKey(format!(
            "{key:?} is the minimum representable key"
        )));
    }
    Ok(())
}

/// Smallest integer part strictly greater than `integer`, lengthening the
/// class where necessary. `None` only at the absolute top (head `z`, all
/// digits at maximum).
pub(crate) fn increment_integer(
    integer: &str,
    alphabet: &Alphabet,
) -> Result<Option<String>, KeyError> {
    let bytes = integer.as_bytes();
    let head = bytes[0];
    let mut digits = bytes[1..].to_vec();
    let mut carry = true;
    for i in (0..digits.len()).rev() {
        let idx = digit_index(alphabet, digits[i])? + 1;
        if idx == alphabet.len() {
            digits[i] = alphabet.smallest();
        } else {
            digits[i] = alphabet.digit(idx);
            carry = false;
            break;
        }
    }
    if carry {
        // Ran off the top of this class.
        if head == b'Z' {
            return Ok(Some(format!("a{}", alphabet.smallest() as char)));
        }
        if head == b'z' {
            return Ok(None);
        }
        let next = head + 1;
        if next > b'a' {
            digits.push(alphabet.smallest());
        } else {
            digits.pop();
        }
        return Ok(Some(render(next, &digits)));
    }
    Ok(Some(render(head, &digits)))
}

/// Largest integer part strictly smaller than `integer`, shortening the
/// class where necessary. `None` only at the absolute bottom (head `A`,
/// all digits at minimum).
pub(crate) fn decrement_integer(
    integer: &str,
    alphabet: &Alphabet,
) -> Result<Option<String>, KeyError> {
    let bytes = integer.as_bytes();
    let head = bytes[0];
    let mut digits = bytes[1..].to_vec();
    let mut borrow = true;
    for i in (0..digits.len()).rev() {
        let idx = digit_index(alphabet, digits[i])?;
        if idx == 0 {
            digits[i] = alphabet.largest();
        } else {
            digits[i] = alphabet.digit(idx - 1);
            borrow = false;
            break;
        }
    }
    if borrow {
        // Ran off the bottom of this class.
        if head == b'a' {
            return Ok(Some(format!("Z{}", alphabet.largest() as char)));
        }
        if head == b'A' {
            return Ok(None);
        }
        let prev = head - 1;
        if prev < b'Z' {
            digits.push(alphabet.largest());
        } else {
            digits.pop();
        }
        return Ok(Some(render(prev, &digits)));
    }
    Ok(Some(render(head, &digits)))
}

/// Shortest fractional string strictly between `a` and `b` (`b` absent
/// means no upper limit), ties broken toward the upper-middle digit.
///
/// Preconditions, guaranteed by key validation upstream: `a < b` when `b`
/// is present (treating a missing position in `a` as the smallest digit),
/// and neither argument ends in the smallest digit.
pub(crate) fn midpoint(a: &str, b: Option<&str>, alphabet: &Alphabet) -> Result<String, KeyError> {
    if let Some(b) = b {
        // Shared prefix carries over verbatim; bisect only the tail.
        let ab = a.as_bytes();
        let bb = b.as_bytes();
        let mut n = 0;
        while n < bb.len() && ab.get(n).copied().unwrap_or(alphabet.smallest()) == bb[n] {
            n += 1;
        }
        if n > 0 {
            let rest_a = if n <= a.len() { &a[n..] } else { "" };
            let tail = midpoint(rest_a, Some(&b[n..]), alphabet)?;
            return Ok(format!("{}{}", &b[..n], tail));
        }
    }

    let digit_a = match a.as_bytes().first() {
        Some(&d) => digit_index(alphabet, d)?,
        None => 0,
    };
    let digit_b = match b {
        Some(b) => digit_index(alphabet, b.as_bytes()[0])?,
        None => alphabet.len(),
    };
    if digit_b - digit_a > 1 {
        let mid = digit_a + (digit_b - digit_a + 1) / 2;
        return Ok((alphabet.digit(mid) as char).to_string());
    }

    // First digits are consecutive.
    match b {
        Some(b) if b.len() > 1 => Ok(b[..1].to_string()),
        _ => {
            // Keep a's first digit and bisect its tail against the open top.
            let rest_a = if a.is_empty() { "" } else { &a[1..] };
            let tail = midpoint(rest_a, None, alphabet)?;
            Ok(format!("{}{}", alphabet.digit(digit_a) as char, tail))
        }
    }
}

fn render(head: u8, digits: &[u8]) -> String {
    let mut s = String::with_capacity(1 + digits.len());
    s.push(head as char);
    for &d in digits {
        s.push(d as char);
    }
    s
}
