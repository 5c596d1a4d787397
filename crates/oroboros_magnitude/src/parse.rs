//! # Parsing
//!
//! Accepted inputs:
//!
//! - plain digits: `42`, `-1234.5`, `150000000000000000000`
//! - explicit exponent: `1.5E+20`, `15000000000000E+7`, `25e-1`
//! - alphabetic suffix (through [`BigMagnitude::parse_suffixed`]): `1.5K`, `13.4AA`
//!
//! Integer digits beyond the tier's maximum are truncated and counted into the
//! exponent. Fractional digits beyond the tier's precision are dropped; zeros
//! between the point and the first significant digit do not count.

use std::str::FromStr;

use crate::error::{MagnitudeError, MagnitudeResult};
use crate::magnitude::BigMagnitude;
use crate::mantissa::Mantissa;
use crate::suffix;

/// Splits a leading sign off `text`. Returns `(is_negative, rest)`.
fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// Splits unsigned decimal text into whole and fraction digits.
fn split_digits<'a>(input: &str, text: &'a str) -> MagnitudeResult<(&'a str, &'a str)> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(MagnitudeError::parse(input, "missing digits"));
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(MagnitudeError::parse(input, "unexpected character"));
    }
    Ok((whole, fraction))
}

/// Fraction digits that still carry precision after `whole`.
fn significant_fraction<'a, M: Mantissa>(whole: &str, fraction: &'a str) -> &'a str {
    let precision = M::PRECISION as usize;
    let room = if whole.is_empty() {
        let leading_zeros = fraction.len() - fraction.trim_start_matches('0').len();
        leading_zeros.saturating_add(precision)
    } else {
        precision.saturating_sub(whole.len())
    };
    &fraction[..fraction.len().min(room).min(M::MAX_SCALE as usize)]
}

impl<M: Mantissa> BigMagnitude<M> {
    /// Parses plain or `E±N` notation text.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::Parse`] for empty input, stray characters or
    /// an exponent outside `i64`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let gold = DecimalMagnitude::parse("1.5E+20")?;
    /// assert_eq!(gold.length(), 21);
    /// ```
    pub fn parse(input: &str) -> MagnitudeResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MagnitudeError::parse(input, "empty input"));
        }

        let (negative, unsigned) = split_sign(trimmed);
        let (number, mut exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
            Some((number, exponent)) => {
                let exponent = exponent
                    .parse::<i64>()
                    .map_err(|_| MagnitudeError::parse(input, "invalid exponent"))?;
                (number, exponent)
            }
            None => (unsigned, 0),
        };

        let (whole, fraction) = split_digits(input, number)?;
        let whole = whole.trim_start_matches('0');

        let max_digits = M::MAX_DIGITS as usize;
        let (kept_whole, kept_fraction) = if whole.len() > max_digits {
            let excess = i64::try_from(whole.len() - max_digits)
                .map_err(|_| MagnitudeError::parse(input, "too many digits"))?;
            exponent = exponent
                .checked_add(excess)
                .ok_or_else(|| MagnitudeError::parse(input, "exponent out of range"))?;
            (&whole[..max_digits], "")
        } else {
            (whole, significant_fraction::<M>(whole, fraction))
        };

        let mut text = String::with_capacity(kept_whole.len() + kept_fraction.len() + 3);
        if negative {
            text.push('-');
        }
        text.push_str(if kept_whole.is_empty() { "0" } else { kept_whole });
        if !kept_fraction.is_empty() {
            text.push('.');
            text.push_str(kept_fraction);
        }

        let mantissa =
            M::parse_digits(&text).ok_or_else(|| MagnitudeError::parse(input, "invalid digits"))?;
        Ok(Self::new(mantissa, exponent))
    }

    /// Parses a suffix display string such as `1.5K` or `13.4AA`.
    ///
    /// The number is scaled by the suffix's group exponent exactly as if it
    /// were right-padded with zeros: `13.4AA` equals `134` followed by 92
    /// zeros. Text without a suffix goes through [`BigMagnitude::parse`].
    ///
    /// Single `B`, `K`, `M` and `T` always decode on the short scale. Values
    /// of 19-21, 46-48, 52-54 or 73-75 digits display with those letters, so
    /// their suffix strings do not parse back to the same magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::Parse`] for a malformed number or suffix.
    pub fn parse_suffixed(input: &str) -> MagnitudeResult<Self> {
        let trimmed = input.trim();
        let Some(split) = trimmed.find(|c: char| c.is_ascii_alphabetic()) else {
            return Self::parse(trimmed);
        };

        let (number, letters) = trimmed.split_at(split);
        let group = suffix::exponent_from_suffix(letters)?;

        let (negative, unsigned) = split_sign(number.trim_end());
        let (whole, fraction) = split_digits(input, unsigned)?;

        // Shifting the point past the fraction digits keeps the digit string
        // identical to the zero-padded form.
        let shift = i64::try_from(fraction.len())
            .map_err(|_| MagnitudeError::parse(input, "too many digits"))?;
        let exponent = group
            .checked_sub(shift)
            .ok_or_else(|| MagnitudeError::parse(input, "exponent out of range"))?;

        let sign = if negative { "-" } else { "" };
        Self::parse(&format!("{sign}{whole}{fraction}E{exponent}"))
    }
}

impl<M: Mantissa> FromStr for BigMagnitude<M> {
    type Err = MagnitudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
