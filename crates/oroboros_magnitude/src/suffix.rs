//! # Alphabetic Magnitude Suffixes
//!
//! The idle-game display scheme: every suffix covers one group of three
//! decimal digits.
//!
//! | Length   | Suffix | Group exponent |
//! |----------|--------|----------------|
//! | 1-3      | (none) | 0              |
//! | 4-6      | `K`    | 3              |
//! | 7-9      | `M`    | 6              |
//! | 10-12    | `B`    | 9              |
//! | 13-15    | `T`    | 12             |
//! | 16-18    | `A`    | 15             |
//! | 19-21    | `B`    | 18             |
//! | ...      | ...    | ...            |
//! | 91-93    | `Z`    | 90             |
//! | 94-96    | `AA`   | 93             |
//! | 97-99    | `BB`   | 96             |
//!
//! Past `T` the letter cycles through the alphabet and the repeat count grows
//! by one every 26 groups, up to [`MAX_SUFFIX_REPEATS`] letters. Larger
//! groups have no suffix.
//!
//! ## Ambiguity
//!
//! The extended single letters `B`, `K`, `M` and `T` collide with the short
//! scale. Decoding always picks the short scale, so those four extended groups
//! (lengths 19-21, 46-48, 52-54, 73-75) do not survive a display round trip.

use crate::error::{MagnitudeError, MagnitudeResult};

/// Fixed short-scale suffixes and their group exponents.
const SHORT_SCALE: [(&str, i64); 4] = [("K", 3), ("M", 6), ("B", 9), ("T", 12)];

/// Group exponent of the first extended suffix, `A`.
const EXTENDED_BASE_EXPONENT: i64 = 15;

/// Letters in the extended cycle.
const ALPHABET_LEN: i64 = 26;

/// Decimal digits covered by one suffix.
const GROUP_WIDTH: i64 = 3;

/// Longest letter run the encoder emits (`ZZZZZZZZZZ`).
pub const MAX_SUFFIX_REPEATS: i64 = 10;

/// Group exponent of the last suffix, 792 for lengths 793-795.
pub const MAX_SUFFIX_EXPONENT: i64 =
    EXTENDED_BASE_EXPONENT + GROUP_WIDTH * (ALPHABET_LEN * MAX_SUFFIX_REPEATS - 1);

/// Power of ten of the 3-digit group a value of `length` digits starts in.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(group_exponent(16), 15); // "A"
/// ```
#[must_use]
pub fn group_exponent(length: i64) -> i64 {
    if length <= GROUP_WIDTH {
        0
    } else {
        GROUP_WIDTH * ((length - 1) / GROUP_WIDTH)
    }
}

/// Suffix for a group exponent (a multiple of three).
///
/// Returns `None` above [`MAX_SUFFIX_EXPONENT`].
#[must_use]
pub fn suffix_for_exponent(exponent: i64) -> Option<String> {
    if exponent < GROUP_WIDTH {
        return Some(String::new());
    }
    if exponent > MAX_SUFFIX_EXPONENT {
        return None;
    }
    if let Some((suffix, _)) = SHORT_SCALE.iter().find(|(_, e)| *e == exponent) {
        return Some((*suffix).to_owned());
    }

    let index = (exponent - EXTENDED_BASE_EXPONENT) / GROUP_WIDTH;
    let letter = char::from(b'A' + (index % ALPHABET_LEN) as u8);
    let repeats = (index / ALPHABET_LEN + 1) as usize;
    Some(std::iter::repeat(letter).take(repeats).collect())
}

/// Suffix for a value with `length` total digits.
#[inline]
#[must_use]
pub fn suffix_for_length(length: i64) -> Option<String> {
    suffix_for_exponent(group_exponent(length))
}

/// Inverts [`suffix_for_exponent`]: `"K"` → 3, `"A"` → 15, `"AA"` → 93.
///
/// An empty suffix is exponent 0. Matching is ASCII case-insensitive.
///
/// # Errors
///
/// Returns [`MagnitudeError::Parse`] unless the suffix is one short-scale
/// letter or a run of one repeated letter.
pub fn exponent_from_suffix(suffix: &str) -> MagnitudeResult<i64> {
    let trimmed = suffix.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let upper = trimmed.to_ascii_uppercase();
    if let Some((_, exponent)) = SHORT_SCALE.iter().find(|(s, _)| *s == upper) {
        return Ok(*exponent);
    }

    let bytes = upper.as_bytes();
    let letter = bytes[0];
    if !letter.is_ascii_uppercase() {
        return Err(MagnitudeError::parse(suffix, "suffix must be letters"));
    }
    if bytes.iter().any(|&b| b != letter) {
        return Err(MagnitudeError::parse(suffix, "suffix must repeat a single letter"));
    }

    let repeats = i64::try_from(bytes.len() - 1)
        .map_err(|_| MagnitudeError::parse(suffix, "suffix too long"))?;
    let index = repeats
        .checked_mul(ALPHABET_LEN)
        .and_then(|i| i.checked_add(i64::from(letter - b'A')))
        .and_then(|i| i.checked_mul(GROUP_WIDTH))
        .and_then(|i| i.checked_add(EXTENDED_BASE_EXPONENT))
        .ok_or_else(|| MagnitudeError::parse(suffix, "suffix too long"))?;
    Ok(index)
}
