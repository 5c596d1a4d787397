//! # Mantissa Precision Tiers
//!
//! A [`BigMagnitude`](crate::BigMagnitude) keeps its significant digits in a
//! bounded-precision mantissa and everything else in a base-10 exponent.
//! The mantissa type decides how many digits survive.
//!
//! ## Precision Tiers
//!
//! - `f64`: fast, 15-17 significant digits, binary rounding
//! - [`Decimal`]: 28 significant digits, exact decimal scaling
//!
//! ## Why Two Tiers?
//!
//! Idle-game economies tick thousands of values per frame. The `f64` tier is
//! cheap enough for that. Save files and the server-side bank want digits that
//! do not drift when divided by ten, which is what the `Decimal` tier gives.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use rust_decimal::prelude::{FromPrimitive, MathematicalOps, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Integer digits kept by the `f64` tier (MAX = 10^15).
const FLOAT_MAX_DIGITS: u32 = 15;

/// Integer digits kept by the `Decimal` tier (MAX = 10^14).
///
/// Two full mantissas must multiply without leaving the 96-bit range.
const DECIMAL_MAX_DIGITS: u32 = 14;

/// Largest power of ten a `Decimal` can hold or scale by.
const DECIMAL_MAX_SCALE: i64 = 28;

/// Powers of ten beyond this are zero or infinite for `f64`.
const FLOAT_MAX_SCALE: i64 = 400;

/// A bounded-precision number usable as the significand of a magnitude.
///
/// Implementors describe their safe precision window through
/// [`Mantissa::MAX_DIGITS`] and provide the handful of decimal operations the
/// normalization, arithmetic and formatting code needs.
pub trait Mantissa:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Integer digits a normalized mantissa keeps once the exponent is positive.
    const MAX_DIGITS: u32;

    /// Significant digits the type can represent at all.
    const PRECISION: u32;

    /// Fractional digits [`Mantissa::parse_digits`] accepts.
    const MAX_SCALE: u32;

    /// Zero.
    const ZERO: Self;

    /// One.
    const ONE: Self;

    /// Ten.
    const TEN: Self;

    /// The maximum mantissa magnitude, `10^MAX_DIGITS`.
    fn ceiling() -> Self;

    /// Converts a native integer. Callers keep it within `PRECISION` digits.
    fn from_int(value: i64) -> Self;

    /// Converts a float. `None` if the tier cannot represent it.
    fn from_float(value: f64) -> Option<Self>;

    /// Converts to the nearest float.
    fn to_float(self) -> f64;

    /// Parses plain decimal text (`-123.45`, no exponent).
    fn parse_digits(text: &str) -> Option<Self>;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Returns true if this value is zero (of either sign).
    fn is_zero(self) -> bool;

    /// Returns false for NaN and infinities.
    fn is_finite(self) -> bool;

    /// Integer part, rounded toward zero.
    fn trunc(self) -> Self;

    /// Fractional part, keeping the sign.
    fn fract(self) -> Self;

    /// Rounds half away from zero to `places` decimals.
    fn round_dp(self, places: u32) -> Self;

    /// Square root of a non-negative value.
    fn root(self) -> Self;

    /// Raises a non-negative value to a real power.
    fn raise(self, exponent: f64) -> Self;

    /// `10^exponent`, saturating at the tier's limits.
    fn pow10(exponent: i64) -> Self;

    /// Total order over all values of the tier.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// `floor(log10(|self|)) + 1`, or 1 for zero.
    ///
    /// Values below one report zero or a negative count.
    fn digit_count(self) -> i64;

    /// Renders without an exponent and without trailing fractional zeros.
    fn to_plain_string(self) -> String;
}

// =============================================================================
// f64 - Fast Tier
// =============================================================================

impl Mantissa for f64 {
    const MAX_DIGITS: u32 = FLOAT_MAX_DIGITS;
    const PRECISION: u32 = 17;
    const MAX_SCALE: u32 = FLOAT_MAX_SCALE as u32;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TEN: Self = 10.0;

    #[inline]
    fn ceiling() -> Self {
        1e15
    }

    #[inline]
    fn from_int(value: i64) -> Self {
        value as f64
    }

    #[inline]
    fn from_float(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }

    #[inline]
    fn to_float(self) -> f64 {
        self
    }

    fn parse_digits(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0.0
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn trunc(self) -> Self {
        f64::trunc(self)
    }

    #[inline]
    fn fract(self) -> Self {
        f64::fract(self)
    }

    fn round_dp(self, places: u32) -> Self {
        let scale = 10f64.powi(places as i32);
        (self * scale).round() / scale
    }

    #[inline]
    fn root(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn raise(self, exponent: f64) -> Self {
        f64::powf(self, exponent)
    }

    fn pow10(exponent: i64) -> Self {
        let clamped = exponent.clamp(-FLOAT_MAX_SCALE, FLOAT_MAX_SCALE) as i32;
        if clamped < 0 {
            1.0 / 10f64.powi(-clamped)
        } else {
            10f64.powi(clamped)
        }
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }

    fn digit_count(self) -> i64 {
        let magnitude = f64::abs(self);
        if magnitude == 0.0 {
            return 1;
        }
        // Exact for anything a u64 can hold; log10 rounds near powers of ten.
        if (1.0..1e19).contains(&magnitude) {
            return i64::from((magnitude as u64).ilog10()) + 1;
        }
        magnitude.log10().floor() as i64 + 1
    }

    fn to_plain_string(self) -> String {
        format!("{self}")
    }
}

// =============================================================================
// Decimal - Exact Tier
// =============================================================================

impl Mantissa for Decimal {
    const MAX_DIGITS: u32 = DECIMAL_MAX_DIGITS;
    const PRECISION: u32 = 28;
    const MAX_SCALE: u32 = DECIMAL_MAX_SCALE as u32;
    const ZERO: Self = Decimal::ZERO;
    const ONE: Self = Decimal::ONE;
    const TEN: Self = Decimal::TEN;

    #[inline]
    fn ceiling() -> Self {
        Decimal::from(10i64.pow(DECIMAL_MAX_DIGITS))
    }

    #[inline]
    fn from_int(value: i64) -> Self {
        Decimal::from(value)
    }

    #[inline]
    fn from_float(value: f64) -> Option<Self> {
        <Decimal as FromPrimitive>::from_f64(value)
    }

    #[inline]
    fn to_float(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }

    fn parse_digits(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    #[inline]
    fn abs(self) -> Self {
        Decimal::abs(&self)
    }

    #[inline]
    fn is_zero(self) -> bool {
        Decimal::is_zero(&self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        true
    }

    #[inline]
    fn trunc(self) -> Self {
        Decimal::trunc(&self)
    }

    #[inline]
    fn fract(self) -> Self {
        Decimal::fract(&self)
    }

    fn round_dp(self, places: u32) -> Self {
        self.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
    }

    fn root(self) -> Self {
        MathematicalOps::sqrt(&self).unwrap_or(Decimal::ZERO)
    }

    fn raise(self, exponent: f64) -> Self {
        MathematicalOps::checked_powf(&self, exponent)
            .or_else(|| Self::from_float(self.to_float().powf(exponent)))
            .unwrap_or(Decimal::ZERO)
    }

    fn pow10(exponent: i64) -> Self {
        match exponent {
            e if e > DECIMAL_MAX_SCALE => Decimal::MAX,
            e if e >= 0 => Decimal::from_i128_with_scale(10i128.pow(e as u32), 0),
            e if e >= -DECIMAL_MAX_SCALE => Decimal::new(1, (-e) as u32),
            _ => Decimal::ZERO,
        }
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn digit_count(self) -> i64 {
        // value = unscaled / 10^scale, so the digit count is exact.
        let unscaled = self.mantissa().unsigned_abs();
        if unscaled == 0 {
            return 1;
        }
        i64::from(unscaled.ilog10()) + 1 - i64::from(self.scale())
    }

    fn to_plain_string(self) -> String {
        self.normalize().to_string()
    }
}
