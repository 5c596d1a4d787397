//! # Text Encodings
//!
//! Four renderings of a magnitude:
//!
//! | Encoding | Example            | Lossless | Use                  |
//! |----------|--------------------|----------|----------------------|
//! | Plain    | `150000000000000000000` | digits beyond the mantissa are zero-filled | logs, exports |
//! | Notation | `1.5E+20`          | no (2 decimals) | debug overlays   |
//! | Suffix   | `150A`             | no (display rounding) | HUD counters |
//! | Compact  | `15000000000000E+7` | yes     | save files, `Display` |
//!
//! All buffers are local to the call, so formatting is safe from any thread.

use std::fmt;

use crate::magnitude::BigMagnitude;
use crate::mantissa::Mantissa;
use crate::suffix;

/// Renders a mantissa, printing every zero as `0`.
pub(crate) fn render<M: Mantissa>(value: M) -> String {
    if value.is_zero() {
        "0".to_owned()
    } else {
        value.to_plain_string()
    }
}

/// Digit groups below this length print without a suffix or reduction.
const SHORT_LENGTH: i64 = 3;

/// Decimals kept by the notation and short renderings.
const DISPLAY_DECIMALS: u32 = 2;

impl<M: Mantissa> BigMagnitude<M> {
    /// Short values rounded for display: 0 decimals when `strip_fraction`.
    fn short_string(&self, strip_fraction: bool) -> String {
        let places = if strip_fraction { 0 } else { DISPLAY_DECIMALS };
        render(self.mantissa.round_dp(places))
    }

    /// Full digit string of the value.
    ///
    /// Values of at most three digits render rounded to 0 decimals (or 2 when
    /// `strip_fraction` is false). Longer values print every integer digit;
    /// digits the mantissa does not hold are written as zeros.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let value: DecimalMagnitude = "1.5E+20".parse()?;
    /// assert_eq!(value.to_plain_string(true), "150000000000000000000");
    /// ```
    #[must_use]
    pub fn to_plain_string(&self, strip_fraction: bool) -> String {
        if self.length() <= SHORT_LENGTH {
            return self.short_string(strip_fraction);
        }

        let text = render(self.mantissa);
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let width = usize::try_from(self.exponent).unwrap_or(0);

        let mut out = String::with_capacity(whole.len() + width);
        out.push_str(whole);
        out.extend(fraction.chars().chain(std::iter::repeat('0')).take(width));
        out
    }

    /// Scientific notation with two decimals: `1.23E+45`.
    ///
    /// Values of at most three digits with no exponent print as a plain
    /// number rounded to two decimals.
    #[must_use]
    pub fn to_notation_string(&self) -> String {
        if self.exponent == 0 && self.digits <= SHORT_LENGTH {
            return self.short_string(false);
        }

        let shift = self.digits - 1;
        let mut lead = (self.mantissa / M::pow10(shift)).round_dp(DISPLAY_DECIMALS);
        let mut power = self.exponent.saturating_add(shift);
        // 9.996 rounds to 10.00
        if lead.abs() >= M::TEN {
            lead = lead / M::TEN;
            power = power.saturating_add(1);
        }
        format!("{}E+{power}", render(lead))
    }

    /// Alphabetic-suffix display string: `999`, `1.5K`, `123T`, `1.23A`, `13.4AA`.
    ///
    /// Shows the one to three leading digits of the current three-digit group,
    /// rounded to 2, 1 or 0 decimals as the group fills up. Values past the
    /// longest suffix ([`suffix::MAX_SUFFIX_EXPONENT`]) use notation instead.
    #[must_use]
    pub fn to_suffix_string(&self) -> String {
        let length = self.length();
        if length <= SHORT_LENGTH {
            return self.short_string(false);
        }

        let mut group = suffix::group_exponent(length);
        let lead_digits = length - group;
        let lead = self.mantissa / M::pow10(self.digits - lead_digits);

        let places = if lead.abs() >= M::from_int(100) {
            0
        } else if lead.abs() >= M::TEN {
            1
        } else {
            DISPLAY_DECIMALS
        };
        let mut rounded = lead.round_dp(places);

        // 999.6K rounds into the next group
        let group_size = M::from_int(1000);
        if rounded.abs() >= group_size {
            rounded = rounded / group_size;
            group = group.saturating_add(3);
        }

        let Some(letters) = suffix::suffix_for_exponent(group) else {
            return self.to_notation_string();
        };
        let mut out = render(rounded);
        out.push_str(&letters);
        out
    }

    /// Suffix for this value's length, empty below four digits.
    ///
    /// `None` past the longest suffix.
    #[inline]
    #[must_use]
    pub fn suffix(&self) -> Option<String> {
        suffix::suffix_for_length(self.length())
    }

    /// Lossless `mantissa[E+exponent]` encoding: `12345678901234.5E+20`.
    ///
    /// Parses back to the identical value.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        let mantissa = render(self.mantissa);
        if self.exponent == 0 {
            mantissa
        } else {
            format!("{mantissa}E+{}", self.exponent)
        }
    }
}

impl<M: Mantissa> fmt::Display for BigMagnitude<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_string())
    }
}

impl<M: Mantissa> fmt::Debug for BigMagnitude<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigMagnitude")
            .field("mantissa", &self.mantissa)
            .field("exponent", &self.exponent)
            .finish()
    }
}
