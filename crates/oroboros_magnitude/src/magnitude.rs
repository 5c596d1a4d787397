//! # Scaled Magnitudes
//!
//! **Numbers far beyond `f64` range with a bounded number of significant digits.**
//!
//! A [`BigMagnitude`] is `mantissa × 10^exponent`. The mantissa keeps at most
//! [`Mantissa::MAX_DIGITS`] integer digits; everything else lives in the
//! exponent. This is a lossy representation: adding 1 to 10^40 is a no-op.
//!
//! ## Normalization Invariant
//!
//! After every public operation:
//!
//! 1. `exponent > 0` implies `MAX/10 <= |mantissa| < MAX`
//! 2. `exponent == 0` allows any `|mantissa| < MAX`, fractions included
//! 3. `exponent` is never negative
//! 4. `mantissa == 0` implies `exponent == 0`
//!
//! The upper bound is exclusive so every value has exactly one normalized
//! form. Equal-exponent values therefore have comparable digit counts, which
//! is what makes the exponent-first ordering valid.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::mantissa::Mantissa;

/// A number represented as a bounded mantissa scaled by a power of ten.
///
/// Generic over the mantissa precision tier. Use [`FloatMagnitude`] for the
/// fast tier and [`DecimalMagnitude`] for the exact one.
#[derive(Clone, Copy)]
pub struct BigMagnitude<M: Mantissa = Decimal> {
    pub(crate) mantissa: M,
    pub(crate) exponent: i64,
    /// Cached `mantissa.digit_count()`.
    pub(crate) digits: i64,
}

/// Magnitude with an `f64` mantissa (MAX = 10^15).
pub type FloatMagnitude = BigMagnitude<f64>;

/// Magnitude with a `Decimal` mantissa (MAX = 10^14).
pub type DecimalMagnitude = BigMagnitude<Decimal>;

impl<M: Mantissa> BigMagnitude<M> {
    /// Zero value.
    pub const ZERO: Self = Self {
        mantissa: M::ZERO,
        exponent: 0,
        digits: 1,
    };

    /// One unit.
    pub const ONE: Self = Self {
        mantissa: M::ONE,
        exponent: 0,
        digits: 1,
    };

    /// Creates `mantissa × 10^exponent`, normalized.
    ///
    /// Negative exponents are folded into the mantissa, dropping digits the
    /// tier cannot hold.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let gold = DecimalMagnitude::new(Decimal::from(15), 20); // 1.5E+21
    /// ```
    #[must_use]
    pub fn new(mantissa: M, exponent: i64) -> Self {
        let mut value = Self {
            mantissa,
            exponent,
            digits: 1,
        };
        value.normalize();
        value
    }

    /// Creates a magnitude from a bare mantissa (exponent 0).
    #[inline]
    #[must_use]
    pub fn from_mantissa(mantissa: M) -> Self {
        Self::new(mantissa, 0)
    }

    /// Returns the mantissa.
    #[inline]
    #[must_use]
    pub fn mantissa(&self) -> M {
        self.mantissa
    }

    /// Returns the power of ten applied to the mantissa.
    #[inline]
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Number of integer digits in the mantissa (1 for zero).
    #[inline]
    #[must_use]
    pub fn digit_count(&self) -> i64 {
        self.digits
    }

    /// Total decimal digits of the represented value (`digit_count + exponent`).
    #[inline]
    #[must_use]
    pub fn length(&self) -> i64 {
        self.digits.saturating_add(self.exponent)
    }

    /// Returns true if this value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns true if this value is below zero.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa < M::ZERO
    }

    /// Absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            ..self
        }
    }

    /// Restores the normalization invariant in place.
    ///
    /// Every constructor and operator already calls this; it is public so
    /// callers holding a value can assert idempotence.
    pub fn normalize(&mut self) {
        if self.mantissa.is_zero() {
            *self = Self::ZERO;
            return;
        }

        let ceiling = M::ceiling();
        let floor = ceiling / M::TEN;
        let mut magnitude = self.mantissa.abs();

        while magnitude >= ceiling && magnitude.is_finite() {
            self.mantissa = self.mantissa / M::TEN;
            magnitude = magnitude / M::TEN;
            self.exponent = self.exponent.saturating_add(1);
        }

        while magnitude < floor && self.exponent > 0 {
            self.mantissa = self.mantissa * M::TEN;
            magnitude = magnitude * M::TEN;
            self.exponent -= 1;
        }

        if self.exponent < 0 {
            // Collapses back to exponent 0; digits below the tier's
            // resolution are lost.
            self.mantissa = self.mantissa * M::pow10(self.exponent);
            self.exponent = 0;
        }

        if self.mantissa.is_zero() {
            *self = Self::ZERO;
            return;
        }

        self.digits = self.mantissa.digit_count();
    }

    /// Returns a normalized copy.
    #[inline]
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// -1, 0 or 1.
    #[inline]
    fn sign(&self) -> i8 {
        if self.mantissa.is_zero() {
            0
        } else if self.mantissa < M::ZERO {
            -1
        } else {
            1
        }
    }

    /// Total order: sign first, then exponent, then mantissa.
    ///
    /// Valid only for normalized values; equal exponents imply mantissas in
    /// the same digit window. Between two negative values a larger exponent
    /// means a smaller number.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = (self.sign(), other.sign());
        if lhs != rhs {
            return lhs.cmp(&rhs);
        }
        if lhs == 0 {
            return Ordering::Equal;
        }

        let by_exponent = match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => return self.mantissa.total_cmp(&other.mantissa),
            by_exponent => by_exponent,
        };

        if lhs < 0 {
            by_exponent.reverse()
        } else {
            by_exponent
        }
    }
}

impl<M: Mantissa> Default for BigMagnitude<M> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<M: Mantissa> PartialEq for BigMagnitude<M> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<M: Mantissa> Eq for BigMagnitude<M> {}

impl<M: Mantissa> PartialOrd for BigMagnitude<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M: Mantissa> Ord for BigMagnitude<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_new_scales_large_mantissa() {
        // 1.5 × 10^20 = 150_000_000_000_000 × 10^6 in the Decimal tier
        let value = DecimalMagnitude::new(dec("150000000000000000000"), 0);
        assert_eq!(value.mantissa(), dec("15000000000000"));
        assert_eq!(value.exponent(), 7);
        assert_eq!(value.digit_count(), 14);
        assert_eq!(value.length(), 21);
    }

    #[test]
    fn test_new_pulls_small_mantissa_up() {
        let value = DecimalMagnitude::new(dec("9"), 20);
        assert_eq!(value.mantissa(), dec("90000000000000"));
        assert_eq!(value.exponent(), 7);
    }

    #[test]
    fn test_positive_exponent_collapses_when_it_fits() {
        let value = DecimalMagnitude::new(dec("9"), 5);
        assert_eq!(value.mantissa(), dec("900000"));
        assert_eq!(value.exponent(), 0);
    }

    #[test]
    fn test_negative_exponent_folds_into_mantissa() {
        let value = DecimalMagnitude::new(dec("15"), -1);
        assert_eq!(value.mantissa(), dec("1.5"));
        assert_eq!(value.exponent(), 0);

        let vanished = DecimalMagnitude::new(dec("15"), -40);
        assert!(vanished.is_zero());
        assert_eq!(vanished.exponent(), 0);
    }

    #[test]
    fn test_zero_has_no_exponent() {
        let value = FloatMagnitude::new(0.0, 42);
        assert_eq!(value.exponent(), 0);
        assert_eq!(value.digit_count(), 1);

        let negative_zero = FloatMagnitude::new(-0.0, 0);
        assert!(negative_zero.mantissa().is_sign_positive());
    }

    #[test]
    fn test_float_window() {
        let value = FloatMagnitude::new(1e20, 0);
        assert_eq!(value.mantissa(), 1e14);
        assert_eq!(value.exponent(), 6);
    }

    #[test]
    fn test_boundary_has_one_form() {
        let from_above = DecimalMagnitude::new(dec("1000000000000000"), 0);
        let from_below = DecimalMagnitude::new(dec("1"), 15);
        assert_eq!(from_above.mantissa(), from_below.mantissa());
        assert_eq!(from_above.exponent(), from_below.exponent());
        assert_eq!(from_above.exponent(), 2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut value = DecimalMagnitude::new(dec("123456789012345678"), 3);
        let before = (value.mantissa(), value.exponent(), value.digit_count());
        value.normalize();
        assert_eq!((value.mantissa(), value.exponent(), value.digit_count()), before);
    }

    #[test]
    fn test_ordering_exponent_first() {
        let big = DecimalMagnitude::new(dec("10000000000000"), 2);
        let small = DecimalMagnitude::new(dec("99999999999999"), 1);
        assert!(big > small);
        assert!(small < big);
        assert_eq!(big.compare(&big), Ordering::Equal);
    }

    #[test]
    fn test_ordering_signed() {
        let negative_huge = FloatMagnitude::new(-5.0, 30);
        let three = FloatMagnitude::new(3.0, 0);
        let negative_small = FloatMagnitude::new(-2.0, 0);
        assert!(negative_huge < three);
        assert!(negative_huge < negative_small);
        assert!(negative_small < FloatMagnitude::ZERO);
        assert!(FloatMagnitude::ZERO < three);
    }

    #[test]
    fn test_equality_ignores_decimal_scale() {
        let a = DecimalMagnitude::new(dec("1.50"), 0);
        let b = DecimalMagnitude::new(dec("1.5"), 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_abs() {
        let value = FloatMagnitude::new(-7.0, 0);
        assert_eq!(value.abs(), FloatMagnitude::new(7.0, 0));
        assert!(value.is_negative());
        assert!(!value.abs().is_negative());
    }
}
