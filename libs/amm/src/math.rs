//! Widened integer helpers and decimal square root
//!
//! Amounts cross the API as `u128`; every product is formed in `U256` before
//! the single division so nothing is truncated early.

use ethnum::U256;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AmmError, Result};

#[inline]
pub(crate) fn wide(value: u128) -> U256 {
    U256::new(value)
}

/// Multiply in 256 bits, failing instead of wrapping
#[inline]
pub(crate) fn mul(a: U256, b: U256, operation: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(AmmError::overflow(operation))
}

#[inline]
pub(crate) fn add(a: U256, b: U256, operation: &'static str) -> Result<U256> {
    a.checked_add(b).ok_or(AmmError::overflow(operation))
}

/// Narrow a 256-bit intermediate back to the `u128` boundary type
#[inline]
pub(crate) fn narrow(value: U256, operation: &'static str) -> Result<u128> {
    if value > U256::new(u128::MAX) {
        return Err(AmmError::overflow(operation));
    }
    Ok(value.as_u128())
}

/// `floor(a * b / denominator)` with a 256-bit product
pub(crate) fn mul_div_floor(
    a: u128,
    b: u128,
    denominator: u128,
    operation: &'static str,
) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::invalid("division by zero"));
    }
    narrow(mul(wide(a), wide(b), operation)? / wide(denominator), operation)
}

/// `ceil(a * b / denominator)` with a 256-bit product
pub(crate) fn mul_div_ceil(
    a: u128,
    b: u128,
    denominator: u128,
    operation: &'static str,
) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::invalid("division by zero"));
    }
    let product = mul(wide(a), wide(b), operation)?;
    let denominator = wide(denominator);
    let mut quotient = product / denominator;
    if product % denominator != U256::ZERO {
        quotient = add(quotient, U256::ONE, operation)?;
    }
    narrow(quotient, operation)
}

/// Integer square root (floor) via Newton's method
pub(crate) fn isqrt(value: U256) -> U256 {
    if value == U256::ZERO {
        return U256::ZERO;
    }

    let two = U256::new(2);
    let mut x = value;
    // value + 1 cannot overflow: callers pass products of two u128 values
    let mut y = (x + value / x) / two;
    while y < x {
        x = y;
        y = (x + value / x) / two;
    }
    x
}

/// Calculate square root of a Decimal using Newton's method
pub(crate) fn decimal_sqrt(value: Decimal) -> Result<Decimal> {
    if value < dec!(0) {
        return Err(AmmError::invalid("square root of negative number"));
    }
    if value == dec!(0) {
        return Ok(dec!(0));
    }

    // Start from 1 for fractions so the first step does not undershoot
    let mut x = value.max(dec!(1));
    let mut last_x = dec!(0);
    let epsilon = dec!(0.0000000001);

    // x_new = (x + value/x) / 2
    let max_iterations = 100;
    for _ in 0..max_iterations {
        let next_x = (x + value / x) / dec!(2);

        if (next_x - last_x).abs() < epsilon {
            return Ok(next_x);
        }

        last_x = x;
        x = next_x;
    }

    // Return best approximation if not fully converged
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div_floor(10, 10, 3, "test").unwrap(), 33);
        assert_eq!(mul_div_ceil(10, 10, 3, "test").unwrap(), 34);
        assert_eq!(mul_div_ceil(10, 9, 3, "test").unwrap(), 30);
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // u128::MAX * u128::MAX would overflow u128 but not U256
        let result = mul_div_floor(u128::MAX, u128::MAX, u128::MAX, "test").unwrap();
        assert_eq!(result, u128::MAX);
    }

    #[test]
    fn test_narrow_overflow() {
        let err = mul_div_floor(u128::MAX, 2, 1, "test").unwrap_err();
        assert_eq!(err, AmmError::Overflow { operation: "test" });
    }

    #[test]
    fn test_division_by_zero_rejected() {
        assert!(matches!(
            mul_div_floor(1, 1, 0, "test"),
            Err(AmmError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(U256::ZERO), U256::ZERO);
        assert_eq!(isqrt(U256::ONE), U256::ONE);
        assert_eq!(isqrt(U256::new(2)), U256::ONE);
        assert_eq!(isqrt(U256::new(3)), U256::ONE);
        assert_eq!(isqrt(U256::new(4)), U256::new(2));
        assert_eq!(isqrt(U256::new(1_000_000_000_000)), U256::new(1_000_000));

        let max_square = wide(u128::MAX) * wide(u128::MAX);
        assert_eq!(isqrt(max_square), wide(u128::MAX));
    }

    #[test]
    fn test_sqrt_accuracy() {
        let result = decimal_sqrt(dec!(100)).unwrap();
        assert!((result - dec!(10)).abs() < dec!(0.0001));

        let result = decimal_sqrt(dec!(2)).unwrap();
        assert!((result - dec!(1.41421356)).abs() < dec!(0.0001));

        let result = decimal_sqrt(dec!(0.25)).unwrap();
        assert!((result - dec!(0.5)).abs() < dec!(0.0001));
    }
}
