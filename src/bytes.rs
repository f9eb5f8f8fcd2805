// Byte-slice helpers used alongside the codecs.
//
// All functions are pure: inputs are borrowed, outputs freshly allocated.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Concatenation
// ---------------------------------------------------------------------------

/// Return a new vector holding `a` followed by `b`.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

/// Concatenate any number of slices into one allocation.
pub fn concat_all(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

// ---------------------------------------------------------------------------
// Splitting and searching
// ---------------------------------------------------------------------------

/// Split `source` at every occurrence of `delimiter`.
///
/// Delimiters are dropped. Adjacent delimiters yield empty segments, and a
/// trailing delimiter yields a trailing empty segment. An empty `source`
/// yields no segments at all.
///
/// ```
/// use varpack::bytes::split;
///
/// assert_eq!(split(b"a,,b,", b','), vec![b"a".to_vec(), vec![], b"b".to_vec(), vec![]]);
/// assert!(split(b"", b',').is_empty());
/// ```
pub fn split(source: &[u8], delimiter: u8) -> Vec<Vec<u8>> {
    if source.is_empty() {
        return Vec::new();
    }
    source
        .split(|&b| b == delimiter)
        .map(<[u8]>::to_vec)
        .collect()
}

/// Whether `prefix` occurs in `haystack` starting at `offset`.
///
/// A negative offset, or one where the prefix would run past the end of
/// `haystack`, is simply `false`.
pub fn starts_with(haystack: &[u8], prefix: &[u8], offset: isize) -> bool {
    let Ok(offset) = usize::try_from(offset) else {
        return false;
    };
    offset
        .checked_add(prefix.len())
        .and_then(|end| haystack.get(offset..end))
        .is_some_and(|window| window == prefix)
}

/// Position of the first occurrence of `needle` at or after `from`.
///
/// An empty needle matches at `from` when `from <= haystack.len()`.
pub fn index_of(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    if needle.is_empty() {
        return Some(from);
    }
    tail.windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Errors from [`from_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("hex string has odd length {0}")]
    OddLength(usize),
    #[error("invalid hex digit {digit:?} at index {index}")]
    InvalidDigit { index: usize, digit: char },
}

/// Lowercase hex rendering of `data`, two digits per byte.
pub fn to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for &b in data {
        out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
        out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
    }
    out
}

/// Parse a hex string (either case). ASCII whitespace is ignored so that
/// space-separated dumps can be pasted back in.
pub fn from_hex(s: &str) -> Result<Vec<u8>, HexError> {
    let digits: Vec<(usize, char)> = s
        .char_indices()
        .filter(|(_, c)| !c.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }
    let nibble = |(index, digit): (usize, char)| -> Result<u8, HexError> {
        digit
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or(HexError::InvalidDigit { index, digit })
    };
    digits
        .chunks_exact(2)
        .map(|pair| -> Result<u8, HexError> { Ok((nibble(pair[0])? << 4) | nibble(pair[1])?) })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
