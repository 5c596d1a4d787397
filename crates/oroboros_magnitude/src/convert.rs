//! # Native Conversions
//!
//! Integers and floats in, integers and floats out. Conversions into native
//! integers are checked: a magnitude that does not fit reports
//! [`MagnitudeError::Overflow`] instead of wrapping.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::{MagnitudeError, MagnitudeResult};
use crate::format::render;
use crate::magnitude::BigMagnitude;
use crate::mantissa::Mantissa;

/// No native integer has more digits than `u64::MAX` (20).
const MAX_NATIVE_LENGTH: i64 = 20;

impl<M: Mantissa> BigMagnitude<M> {
    /// Lossy `f64` approximation. Saturates to infinity past `f64::MAX`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.exponent == 0 {
            return self.mantissa.to_float();
        }
        self.mantissa.to_float() * <f64 as Mantissa>::pow10(self.exponent)
    }

    /// Truncates toward zero and parses the digits as `T`.
    fn to_native<T>(&self, target: &'static str) -> MagnitudeResult<T>
    where
        T: FromStr<Err = ParseIntError>,
    {
        if self.length() > MAX_NATIVE_LENGTH {
            return Err(MagnitudeError::Overflow { target });
        }
        let digits = if self.exponent == 0 {
            render(self.mantissa.trunc())
        } else {
            self.to_plain_string(true)
        };
        digits
            .parse::<T>()
            .map_err(|_| MagnitudeError::Overflow { target })
    }

    /// Converts to `i32`, truncating any fraction.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::Overflow`] outside the `i32` range.
    pub fn to_i32(&self) -> MagnitudeResult<i32> {
        self.to_native("i32")
    }

    /// Converts to `i64`, truncating any fraction.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::Overflow`] outside the `i64` range.
    pub fn to_i64(&self) -> MagnitudeResult<i64> {
        self.to_native("i64")
    }

    /// Converts to `u64`, truncating any fraction.
    ///
    /// # Errors
    ///
    /// Returns [`MagnitudeError::Overflow`] for negative values or values
    /// above `u64::MAX`.
    pub fn to_u64(&self) -> MagnitudeResult<u64> {
        self.to_native("u64")
    }
}

impl<M: Mantissa> From<i64> for BigMagnitude<M> {
    fn from(value: i64) -> Self {
        Self::new(M::from_int(value), 0)
    }
}

impl<M: Mantissa> From<i32> for BigMagnitude<M> {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl<M: Mantissa> From<u32> for BigMagnitude<M> {
    fn from(value: u32) -> Self {
        Self::from(i64::from(value))
    }
}

impl<M: Mantissa> TryFrom<f64> for BigMagnitude<M> {
    type Error = MagnitudeError;

    /// Digits beyond the tier's window move into the exponent before the
    /// float is converted, so values far past `Decimal::MAX` still fit.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MagnitudeError::NonFinite);
        }
        if value == 0.0 {
            return Ok(Self::ZERO);
        }

        let excess = (value.digit_count() - i64::from(M::MAX_DIGITS)).max(0);
        let scaled = value / <f64 as Mantissa>::pow10(excess);
        let mantissa = M::from_float(scaled).unwrap_or(M::ZERO);
        Ok(Self::new(mantissa, excess))
    }
}

impl<M: Mantissa> TryFrom<BigMagnitude<M>> for i32 {
    type Error = MagnitudeError;

    fn try_from(value: BigMagnitude<M>) -> Result<Self, Self::Error> {
        value.to_i32()
    }
}

impl<M: Mantissa> TryFrom<BigMagnitude<M>> for i64 {
    type Error = MagnitudeError;

    fn try_from(value: BigMagnitude<M>) -> Result<Self, Self::Error> {
        value.to_i64()
    }
}

impl<M: Mantissa> TryFrom<BigMagnitude<M>> for u64 {
    type Error = MagnitudeError;

    fn try_from(value: BigMagnitude<M>) -> Result<Self, Self::Error> {
        value.to_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnitude::{DecimalMagnitude, FloatMagnitude};

    #[test]
    fn test_from_integers() {
        let value = DecimalMagnitude::from(1_234_567_i32);
        assert_eq!(value.exponent(), 0);
        assert_eq!(value.to_i64(), Ok(1_234_567));

        let value = DecimalMagnitude::from(i64::MAX);
        assert_eq!(value.length(), 19);
        assert_eq!(value.exponent(), 5);
        assert_eq!(value.to_i64(), Ok(i64::MAX));

        assert_eq!(DecimalMagnitude::from(u32::MAX).to_u64(), Ok(u64::from(u32::MAX)));
        assert_eq!(DecimalMagnitude::from(-42_i64).to_i32(), Ok(-42));
    }

    #[test]
    fn test_twelve_nines_round_trip() {
        let value = DecimalMagnitude::parse("999999999999").unwrap();
        assert_eq!(value.to_i64(), Ok(999_999_999_999));
        let value = FloatMagnitude::parse("999999999999").unwrap();
        assert_eq!(i64::try_from(value), Ok(999_999_999_999));
    }

    #[test]
    fn test_to_native_truncates_fraction() {
        let value = DecimalMagnitude::parse("-7.9").unwrap();
        assert_eq!(value.to_i32(), Ok(-7));
        let value = DecimalMagnitude::parse("0.5").unwrap();
        assert_eq!(value.to_i64(), Ok(0));
    }

    #[test]
    fn test_to_native_overflow() {
        let value = DecimalMagnitude::parse("1E+30").unwrap();
        assert_eq!(value.to_i64(), Err(MagnitudeError::Overflow { target: "i64" }));
        let value = DecimalMagnitude::parse("3000000000").unwrap();
        assert_eq!(value.to_i32(), Err(MagnitudeError::Overflow { target: "i32" }));
        assert!(value.to_i64().is_ok());
        let value = DecimalMagnitude::from(-1_i64);
        assert_eq!(u64::try_from(value), Err(MagnitudeError::Overflow { target: "u64" }));
    }

    #[test]
    fn test_large_exponent_to_u64() {
        // 18446744073709551615 has exponent 6 in the Decimal tier
        let value = DecimalMagnitude::parse("18446744073709551615").unwrap();
        assert_eq!(value.exponent(), 6);
        assert_eq!(value.to_u64(), Ok(18_446_744_073_709_000_000));
    }

    #[test]
    fn test_from_f64() {
        let value = DecimalMagnitude::try_from(1.5e40).unwrap();
        assert_eq!(value.length(), 41);
        assert!((value.to_f64() / 1.5e40 - 1.0).abs() < 1e-12);

        let value = FloatMagnitude::try_from(-2.5).unwrap();
        assert_eq!(value.mantissa(), -2.5);
        assert_eq!(value.exponent(), 0);

        assert!(DecimalMagnitude::try_from(0.0).unwrap().is_zero());
        assert_eq!(
            DecimalMagnitude::try_from(f64::NAN),
            Err(MagnitudeError::NonFinite)
        );
        assert_eq!(
            FloatMagnitude::try_from(f64::INFINITY),
            Err(MagnitudeError::NonFinite)
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(DecimalMagnitude::from(42_i64).to_f64(), 42.0);
        let huge = DecimalMagnitude::parse("1E+400").unwrap();
        assert!(huge.to_f64().is_infinite());
    }
}
