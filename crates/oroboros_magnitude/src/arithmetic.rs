//! # Magnitude Arithmetic
//!
//! Every operation realigns exponents, applies the precision-loss policy and
//! re-normalizes. None of them mutate their inputs.
//!
//! ## Precision Policies
//!
//! - **Add/Sub**: the smaller operand is scaled down to the larger exponent.
//!   Once it drops below the mantissa's resolution it vanishes entirely.
//! - **Mul**: across different exponents, the smaller-exponent operand is
//!   collapsed to a single leading digit before multiplying. This keeps the
//!   product inside the mantissa window without a wider intermediate type.
//! - **Div**: operands above `MAX / 10^5` are pre-scaled on scratch copies to
//!   leave headroom. The divisor is never modified.
//! - **Pow**: bounded-iteration approximation, accurate for the exponent
//!   ranges economies use (roughly `0 < power < 10^6`).

use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::{MagnitudeError, MagnitudeResult};
use crate::magnitude::BigMagnitude;
use crate::mantissa::Mantissa;

/// Digits of headroom division reserves before dividing mantissas.
const DIVISION_HEADROOM: i64 = 5;

/// How [`BigMagnitude::sqrt_with`] treats odd exponents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqrtMode {
    /// Halves the exponent with integer division.
    ///
    /// For odd exponents the result is low by a factor of √10. This matches
    /// values already stored by older clients.
    #[default]
    Truncating,
    /// Moves one power of ten into the mantissa before halving odd exponents.
    Corrected,
}

impl<M: Mantissa> BigMagnitude<M> {
    /// Adds `rhs`, negated when `subtract` is set.
    fn combine(self, rhs: Self, subtract: bool) -> Self {
        if rhs.is_zero() {
            return self;
        }
        let addend = if subtract { -rhs.mantissa } else { rhs.mantissa };
        if self.is_zero() {
            return Self::new(addend, rhs.exponent);
        }

        let (mantissa, exponent) = match self.exponent.cmp(&rhs.exponent) {
            std::cmp::Ordering::Equal => (self.mantissa + addend, self.exponent),
            std::cmp::Ordering::Greater => (
                self.mantissa + addend * M::pow10(rhs.exponent.saturating_sub(self.exponent)),
                self.exponent,
            ),
            std::cmp::Ordering::Less => (
                self.mantissa * M::pow10(self.exponent.saturating_sub(rhs.exponent)) + addend,
                rhs.exponent,
            ),
        };
        Self::new(mantissa, exponent)
    }

    /// Multiplies, collapsing the smaller-exponent operand to one leading digit
    /// when the exponents differ.
    fn multiply(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        if self.exponent == rhs.exponent {
            return Self::new(
                self.mantissa * rhs.mantissa,
                self.exponent.saturating_add(rhs.exponent),
            );
        }

        let (wide, narrow) = if self.exponent > rhs.exponent {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let shift = narrow.digits - 1;
        let collapsed = narrow.mantissa / M::pow10(shift);
        Self::new(
            wide.mantissa * collapsed,
            wide.exponent
                .saturating_add(narrow.exponent)
                .saturating_add(shift),
        )
    }

    /// Scratch copy with headroom for division. Not normalized.
    fn with_division_headroom(mut self) -> Self {
        let headroom = M::ceiling() / M::pow10(DIVISION_HEADROOM);
        if self.mantissa.abs() > headroom {
            self.mantissa = self.mantissa / M::pow10(DIVISION_HEADROOM);
            self.exponent = self.exponent.saturating_add(DIVISION_HEADROOM);
        }
        self
    }

    /// Divides by `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::InvalidOperation`] if `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> MagnitudeResult<Self> {
        if rhs.is_zero() {
            return Err(MagnitudeError::InvalidOperation("cannot divide by zero"));
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }

        let dividend = self.with_division_headroom();
        let mut divisor = rhs.with_division_headroom();

        // A fractional divisor would blow up the quotient's mantissa.
        if divisor.digits < 1 {
            let lift = 1 - divisor.digits;
            divisor.mantissa = divisor.mantissa * M::pow10(lift);
            divisor.exponent = divisor.exponent.saturating_sub(lift);
        }

        Ok(Self::new(
            dividend.mantissa / divisor.mantissa,
            dividend.exponent.saturating_sub(divisor.exponent),
        ))
    }

    /// Remainder of division by `rhs`.
    ///
    /// Returns `self` when `self < rhs` (signed). Otherwise the fractional
    /// part of the quotient's mantissa is scaled back by `rhs`. When the
    /// quotient carries an exponent, its mantissa fraction stands for a
    /// multiple of `10^exponent` units, so the result is only close to the
    /// exact remainder: `10^15 % 3` gives `0.999999999999999`.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::InvalidOperation`] if `rhs` is zero.
    pub fn checked_rem(self, rhs: Self) -> MagnitudeResult<Self> {
        if rhs.is_zero() {
            return Err(MagnitudeError::InvalidOperation("cannot divide by zero"));
        }
        if self < rhs {
            return Ok(self);
        }

        let quotient = self.checked_div(rhs)?;
        Ok(Self::from_mantissa(quotient.mantissa.fract()).multiply(rhs))
    }

    /// Raises to a real power, possibly negative or fractional.
    ///
    /// The base is reduced to a single leading digit `lead × 10^scale`. The
    /// `10^(scale·power)` factor is split into whole and fractional exponents,
    /// and `lead^⌊power⌋` is computed by repeated fourth powers, folding
    /// excess digits into the exponent after every step so the mantissa
    /// never leaves `[1, 10)`. Negative powers invert the positive result.
    ///
    /// Zero stays zero for any non-zero power. Non-finite powers leave the
    /// value unchanged.
    #[must_use]
    pub fn pow(self, power: f64) -> Self {
        if !power.is_finite() {
            tracing::warn!(power, "non-finite power ignored");
            return self;
        }
        if power == 0.0 {
            return Self::ONE;
        }
        if self.is_zero() {
            if power < 0.0 {
                tracing::warn!(power, "zero raised to a negative power; returning zero");
            }
            return Self::ZERO;
        }

        let hat = power.abs().trunc();
        let residual = power.abs() - hat;

        let shift = self.digits - 1;
        let lead = self.mantissa.abs() / M::pow10(shift);
        let scale = self.exponent.saturating_add(shift);

        // 10^(scale·|power|) = 10^whole × 10^res_pow, res_pow in [0, 1)
        let scaled = scale as f64 * power.abs();
        let whole = scaled.floor();
        let mut exponent = whole as i64;
        let res_pow = scaled - whole;

        let (mut mantissa, carried) = raise_leading(lead, hat as u64);
        exponent = exponent.saturating_add(carried);

        if residual > 0.0 {
            mantissa = mantissa * lead.raise(residual);
        }
        if res_pow > 0.0 {
            mantissa = mantissa * M::from_float(10f64.powf(res_pow)).unwrap_or(M::ONE);
        }

        let mut result = Self::new(mantissa, exponent);
        if self.is_negative() && (hat as u64) % 2 == 1 {
            result = -result;
        }
        if power < 0.0 {
            // result is never zero here
            result = Self::ONE.checked_div(result).unwrap_or(Self::ZERO);
        }
        result
    }

    /// Raises to an integer power.
    #[inline]
    #[must_use]
    pub fn powi(self, power: i64) -> Self {
        self.pow(power as f64)
    }

    /// Square root with the default [`SqrtMode::Truncating`] exponent rule.
    #[inline]
    #[must_use]
    pub fn sqrt(self) -> Self {
        self.sqrt_with(SqrtMode::Truncating)
    }

    /// Square root: `mantissa ← √mantissa`, `exponent ← exponent / 2`.
    ///
    /// Negative values are rooted by magnitude.
    #[must_use]
    pub fn sqrt_with(self, mode: SqrtMode) -> Self {
        if self.is_negative() {
            tracing::warn!("square root of a negative magnitude; using its absolute value");
        }
        let mut mantissa = self.mantissa.abs();
        let mut exponent = self.exponent;
        if mode == SqrtMode::Corrected && exponent % 2 != 0 {
            mantissa = mantissa * M::TEN;
            exponent -= 1;
        }
        Self::new(mantissa.root(), exponent / 2)
    }
}

/// `lead^power` for `lead` in `[1, 10)`, as a mantissa in `[1, 10)` plus the
/// power of ten carried out of it.
fn raise_leading<M: Mantissa>(lead: M, power: u64) -> (M, i64) {
    let mut result = M::ONE;
    let mut result_exponent = 0i64;
    let mut base = lead;
    let mut base_exponent = 0i64;
    let mut remaining = power;

    while remaining > 0 {
        for _ in 0..remaining % 4 {
            result = result * base;
            result_exponent = result_exponent.saturating_add(base_exponent);
            (result, result_exponent) = split_leading(result, result_exponent);
        }
        remaining /= 4;
        if remaining > 0 {
            base = base * base * base * base;
            base_exponent = base_exponent.saturating_mul(4);
            (base, base_exponent) = split_leading(base, base_exponent);
        }
    }
    (result, result_exponent)
}

/// Moves all but the leading digit of `value` into the exponent.
fn split_leading<M: Mantissa>(value: M, exponent: i64) -> (M, i64) {
    let shift = value.digit_count() - 1;
    (value / M::pow10(shift), exponent.saturating_add(shift))
}

// =============================================================================
// Operator Traits
// =============================================================================

impl<M: Mantissa> Neg for BigMagnitude<M> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        if self.is_zero() {
            return self;
        }
        Self {
            mantissa: -self.mantissa,
            ..self
        }
    }
}

impl<M: Mantissa> Add for BigMagnitude<M> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, false)
    }
}

impl<M: Mantissa> AddAssign for BigMagnitude<M> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs, false);
    }
}

impl<M: Mantissa> Sub for BigMagnitude<M> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(rhs, true)
    }
}

impl<M: Mantissa> SubAssign for BigMagnitude<M> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs, true);
    }
}

impl<M: Mantissa> Mul for BigMagnitude<M> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl<M: Mantissa> MulAssign for BigMagnitude<M> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(rhs);
    }
}

impl<M: Mantissa> Div for BigMagnitude<M> {
    type Output = Self;

    /// Divides, leaving the dividend unchanged (and logging) on a zero divisor.
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).unwrap_or_else(|error| {
            tracing::warn!(%error, "division skipped; dividend left unchanged");
            self
        })
    }
}

impl<M: Mantissa> DivAssign for BigMagnitude<M> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<M: Mantissa> Rem for BigMagnitude<M> {
    type Output = Self;

    /// Remainder, leaving the dividend unchanged (and logging) on a zero divisor.
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(rhs).unwrap_or_else(|error| {
            tracing::warn!(%error, "remainder skipped; dividend left unchanged");
            self
        })
    }
}

impl<M: Mantissa> RemAssign for BigMagnitude<M> {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl<M: Mantissa> Sum for BigMagnitude<M> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<M: Mantissa> Product for BigMagnitude<M> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnitude::{DecimalMagnitude, FloatMagnitude};
    use rust_decimal::Decimal;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn big(mantissa: &str, exponent: i64) -> DecimalMagnitude {
        DecimalMagnitude::new(dec(mantissa), exponent)
    }

    fn assert_close(actual: DecimalMagnitude, expected: DecimalMagnitude) {
        let ratio = (actual / expected).mantissa().to_float();
        assert!(
            (ratio - 1.0).abs() < 1e-6,
            "{actual:?} is not close to {expected:?}"
        );
    }

    #[test]
    fn test_add_same_exponent() {
        let result = big("1.5", 0) + big("2.25", 0);
        assert_eq!(result, big("3.75", 0));
    }

    #[test]
    fn test_add_realigns_exponents() {
        // 10^20 + 10^19 = 1.1 × 10^20
        let result = big("1", 20) + big("1", 19);
        assert_eq!(result, big("11", 19));
        assert_eq!(result.exponent(), 7);
    }

    #[test]
    fn test_add_small_vanishes_against_huge() {
        let huge = big("1", 60);
        assert_eq!(huge + big("1", 0), huge);
        assert_eq!(huge - big("12345", 0), huge);
    }

    #[test]
    fn test_add_carries_into_exponent() {
        let result = big("99999999999999", 0) + big("1", 0);
        assert_eq!(result.mantissa(), dec("10000000000000"));
        assert_eq!(result.exponent(), 1);
    }

    #[test]
    fn test_sub_to_negative_and_zero() {
        assert_eq!(big("5", 0) - big("8", 0), big("-3", 0));
        let diff = big("7", 30) - big("7", 30);
        assert!(diff.is_zero());
        assert_eq!(diff.exponent(), 0);
        assert_eq!(DecimalMagnitude::ZERO - big("4", 0), big("-4", 0));
    }

    #[test]
    fn test_sub_across_exponents_keeps_fraction_digits() {
        // The scaled-down 1 survives as a mantissa fraction in the Decimal tier
        let result = big("1", 15) - big("1", 0);
        assert_eq!(result, big("999999999999999", 0));
        // 10^15 - 10^14 = 9 × 10^14 fits after normalization
        let result = big("1", 15) - big("1", 14);
        assert_eq!(result, big("9", 14));
        assert_eq!(result.exponent(), 1);
    }

    #[test]
    fn test_mul_same_exponent() {
        let result = big("12", 0) * big("12", 0);
        assert_eq!(result, big("144", 0));
    }

    #[test]
    fn test_mul_collapses_smaller_exponent_operand() {
        // 9 × 10^20 has exponent 7; 987 has exponent 0 and collapses to 9.87
        let wide = big("9", 20);
        let result = wide * big("987", 0);
        assert_eq!(result, big("8883", 20));
        assert_eq!(result.exponent(), 10);
    }

    #[test]
    fn test_mul_both_large() {
        let result = big("2", 30) * big("3", 40);
        assert_eq!(result, big("6", 70));
    }

    #[test]
    fn test_mul_by_zero() {
        let result = big("4", 100) * DecimalMagnitude::ZERO;
        assert!(result.is_zero());
        assert_eq!(result.exponent(), 0);
    }

    #[test]
    fn test_div_basic() {
        assert_eq!(big("10", 0) / big("4", 0), big("2.5", 0));
        assert_eq!(big("6", 70) / big("3", 40), big("2", 30));
    }

    #[test]
    fn test_div_by_fraction() {
        let result = big("1", 0) / big("0.001", 0);
        assert_eq!(result, big("1000", 0));
        let result = big("5", 20) / DecimalMagnitude::new(Decimal::pow10(-20), 0);
        assert_eq!(result, big("5", 40));
    }

    #[test]
    fn test_div_by_zero_reports_and_keeps_dividend() {
        let dividend = big("42", 0);
        assert_eq!(
            dividend.checked_div(DecimalMagnitude::ZERO),
            Err(MagnitudeError::InvalidOperation("cannot divide by zero"))
        );
        assert_eq!(dividend / DecimalMagnitude::ZERO, dividend);
    }

    #[test]
    fn test_div_leaves_divisor_untouched() {
        let dividend = big("99999999999999", 0);
        let divisor = big("99999999999999", 0);
        let snapshot = (divisor.mantissa(), divisor.exponent());
        let quotient = dividend / divisor;
        assert_eq!(quotient, DecimalMagnitude::ONE);
        assert_eq!((divisor.mantissa(), divisor.exponent()), snapshot);
    }

    #[test]
    fn test_rem() {
        assert_eq!(big("7", 0) % big("2", 0), big("1", 0));
        assert_eq!(big("10", 0) % big("4", 0), big("2", 0));
        assert_eq!(big("3", 0) % big("5", 0), big("3", 0));
        assert_eq!(big("7", 0) % big("-2", 0), big("1", 0));
        // Any negative dividend is below a positive divisor
        assert_eq!(big("-7", 0) % big("2", 0), big("-7", 0));
    }

    #[test]
    fn test_rem_keeps_quotient_mantissa_fraction() {
        // q = 33333333333333.33… × 10^1
        let rem = big("1", 15) % big("3", 0);
        assert!(rem > big("0.9999", 0) && rem < big("1", 0), "{rem:?}");

        // q = 12857142857142.857… × 10^27
        assert_close(big("9", 40) % big("7", 0), big("6", 0));
        assert!(!(big("1", 15) % big("7", 0)).is_zero());
    }

    #[test]
    fn test_rem_by_zero() {
        assert!(big("7", 0).checked_rem(DecimalMagnitude::ZERO).is_err());
        assert_eq!(big("7", 0) % DecimalMagnitude::ZERO, big("7", 0));
    }

    #[test]
    fn test_pow_integer() {
        assert_eq!(big("2", 0).powi(10), big("1024", 0));
        assert_eq!(big("10", 0).powi(30), big("1", 30));
        assert_eq!(big("-3", 0).powi(3), big("-27", 0));
        assert_eq!(big("-3", 0).powi(2), big("9", 0));
    }

    #[test]
    fn test_pow_large_exponent_stays_bounded() {
        // 2^1000 ≈ 1.0715 × 10^301
        let result = big("2", 0).powi(1000);
        assert_eq!(result.length(), 302);
        let lead = (result.mantissa() / Decimal::pow10(result.digit_count() - 1)).to_float();
        assert!((lead - 1.0715).abs() < 1e-3);
    }

    #[test]
    fn test_pow_fractional() {
        assert_close(big("16", 0).pow(0.5), big("4", 0));
        assert_close(big("1", 40).pow(0.5), big("1", 20));
        assert_close(big("1000", 0).pow(1.5), big("31622.7766016838", 0));
    }

    #[test]
    fn test_pow_fractional_base() {
        assert_close(big("0.5", 0).powi(2), big("0.25", 0));
        assert_close(big("0.25", 0).pow(0.5), big("0.5", 0));
    }

    #[test]
    fn test_pow_negative_inverts() {
        assert_close(big("4", 0).pow(-1.0), big("0.25", 0));
        assert_close(big("2", 0).pow(-2.0), big("0.25", 0));
    }

    #[test]
    fn test_pow_edges() {
        assert_eq!(big("7", 50).pow(0.0), DecimalMagnitude::ONE);
        assert!(DecimalMagnitude::ZERO.pow(3.0).is_zero());
        assert!(DecimalMagnitude::ZERO.pow(-3.0).is_zero());
        assert_eq!(big("7", 0).pow(f64::NAN), big("7", 0));
    }

    #[test]
    fn test_sqrt_truncating_is_low_for_odd_exponents() {
        // 10^14 in the Decimal tier is 10^13 × 10^1
        let value = big("1", 14);
        assert_eq!(value.exponent(), 1);
        assert_close(value.sqrt(), big("3162277.66016838", 0));
        assert_close(value.sqrt_with(SqrtMode::Corrected), big("1", 7));
    }

    #[test]
    fn test_sqrt_even_exponent_agrees() {
        let value = big("4", 40);
        assert_close(value.sqrt(), value.sqrt_with(SqrtMode::Corrected));
        assert_close(value.sqrt(), big("2", 20));
    }

    #[test]
    fn test_assign_ops() {
        let mut value = big("10", 0);
        value += big("5", 0);
        value -= big("3", 0);
        value *= big("2", 0);
        value /= big("8", 0);
        value %= big("2", 0);
        assert_eq!(value, big("1", 0));
    }

    #[test]
    fn test_sum_and_product() {
        let total: DecimalMagnitude = (1..=4).map(|n| big(&n.to_string(), 0)).sum();
        assert_eq!(total, big("10", 0));
        let product: DecimalMagnitude = (1..=5).map(|n| big(&n.to_string(), 0)).product();
        assert_eq!(product, big("120", 0));
    }

    #[test]
    fn test_float_tier_arithmetic() {
        let a = FloatMagnitude::new(1.5, 20);
        let b = FloatMagnitude::new(2.0, 0);
        let product = a * b;
        assert!((product.to_f64() / 3e20 - 1.0).abs() < 1e-12);
        let quotient = a / b;
        assert!((quotient.to_f64() / 7.5e19 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_exponent_arithmetic_saturates() {
        let huge = DecimalMagnitude::parse("1E+9223372036854775000").unwrap();
        let squared = huge * huge;
        assert_eq!(squared.exponent(), i64::MAX);
        assert!(squared > huge);

        // The fractional divisor is lifted below exponent 0
        let quotient = squared / big("0.001", 0);
        assert!(quotient > huge);

        let cross = squared * big("123", 0);
        assert_eq!(cross.exponent(), i64::MAX);
        assert!(squared.powi(2) > huge);
        assert_eq!(huge + DecimalMagnitude::ONE, huge);
        assert!((DecimalMagnitude::ONE / squared).is_zero());
    }

    #[test]
    fn test_neg() {
        assert_eq!(-big("5", 20), big("-5", 20));
        assert!((-DecimalMagnitude::ZERO).is_zero());
    }
}
