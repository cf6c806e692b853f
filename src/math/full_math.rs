//! Full-width multiply-then-divide.
//!
//! Products of two 256-bit values are formed in 512 bits so that `a * b / d`
//! never loses the high half before the division. Only the final quotient is
//! narrowed back to 256 bits, and a quotient that does not fit is reported as
//! [`MathError::ArithmeticOverflow`] instead of being truncated.

use alloy::primitives::{U256, U512};

use super::error::MathError;

/// Computes `floor(a * b / denominator)`.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    narrow(mul_div_wide(U512::from(a), U512::from(b), U512::from(denominator), false)?)
}

/// Computes `ceil(a * b / denominator)`.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    narrow(mul_div_wide(U512::from(a), U512::from(b), U512::from(denominator), true)?)
}

/// Computes `ceil(a / denominator)`.
pub fn div_rounding_up(a: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::InvalidRatio);
    }
    let quotient = a / denominator;
    if (a % denominator).is_zero() {
        Ok(quotient)
    } else {
        // quotient <= a / 2 here, so the increment cannot wrap
        Ok(quotient + U256::from(1u64))
    }
}

/// `a * b / denominator` entirely in 512 bits, rounding down or up.
///
/// Fails with [`MathError::InvalidRatio`] on a zero denominator and with
/// [`MathError::ArithmeticOverflow`] if `a * b` exceeds 512 bits.
pub(crate) fn mul_div_wide(
    a: U512,
    b: U512,
    denominator: U512,
    round_up: bool,
) -> Result<U512, MathError> {
    if denominator.is_zero() {
        return Err(MathError::InvalidRatio);
    }

    let product = a.checked_mul(b).ok_or(MathError::ArithmeticOverflow)?;
    let quotient = product / denominator;

    if round_up && !(product % denominator).is_zero() {
        quotient
            .checked_add(U512::from(1u64))
            .ok_or(MathError::ArithmeticOverflow)
    } else {
        Ok(quotient)
    }
}

/// Narrows a 512-bit value to 256 bits.
pub(crate) fn narrow(value: U512) -> Result<U256, MathError> {
    U256::checked_from_limbs_slice(value.as_limbs()).ok_or(MathError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floors() {
        let result = mul_div(U256::from(7u64), U256::from(3u64), U256::from(2u64)).unwrap();
        assert_eq!(result, U256::from(10u64));
    }

    #[test]
    fn test_mul_div_rounding_up_ceils_only_with_remainder() {
        let up = mul_div_rounding_up(U256::from(7u64), U256::from(3u64), U256::from(2u64)).unwrap();
        assert_eq!(up, U256::from(11u64));

        let exact = mul_div_rounding_up(U256::from(8u64), U256::from(3u64), U256::from(2u64)).unwrap();
        assert_eq!(exact, U256::from(12u64));
    }

    #[test]
    fn test_mul_div_keeps_high_bits_of_product() {
        // MAX * MAX / MAX needs the full 512-bit product
        let result = mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap();
        assert_eq!(result, U256::MAX);
    }

    #[test]
    fn test_mul_div_overflowing_quotient() {
        let result = mul_div(U256::MAX, U256::from(2u64), U256::from(1u64));
        assert_eq!(result, Err(MathError::ArithmeticOverflow));
    }

    #[test]
    fn test_zero_denominator_is_rejected() {
        assert_eq!(
            mul_div(U256::from(1u64), U256::from(1u64), U256::ZERO),
            Err(MathError::InvalidRatio)
        );
        assert_eq!(
            mul_div_rounding_up(U256::from(1u64), U256::from(1u64), U256::ZERO),
            Err(MathError::InvalidRatio)
        );
        assert_eq!(div_rounding_up(U256::from(1u64), U256::ZERO), Err(MathError::InvalidRatio));
    }

    #[test]
    fn test_div_rounding_up() {
        assert_eq!(div_rounding_up(U256::from(10u64), U256::from(5u64)).unwrap(), U256::from(2u64));
        assert_eq!(div_rounding_up(U256::from(11u64), U256::from(5u64)).unwrap(), U256::from(3u64));
        assert_eq!(div_rounding_up(U256::ZERO, U256::from(5u64)).unwrap(), U256::ZERO);
    }
}
