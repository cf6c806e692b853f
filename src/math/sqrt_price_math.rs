//! Token amounts spanned by liquidity between two sqrt prices.
//!
//! Integer versions of the Uniswap V3 `SqrtPriceMath` amount deltas:
//! - amount0 = L * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)
//! - amount1 = L * (sqrt_b - sqrt_a)
//!
//! with both sqrt prices in Q64.96. Liquidity is accepted as a full `U256`, so
//! the `L << 96` numerator and the products are formed in 512 bits.

use alloy::primitives::{U256, U512};

use super::error::MathError;
use super::full_math::{mul_div_wide, narrow};

/// Resolution of the Q64.96 format.
pub const RESOLUTION: usize = 96;

/// 2^96
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Orders the pair so that `a <= b`, rejecting zero ratios.
fn sorted_ratios(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> Result<(U256, U256), MathError> {
    let (lower, upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    if lower.is_zero() {
        return Err(MathError::InvalidRatio);
    }

    Ok((lower, upper))
}

/// Amount of token0 represented by `liquidity` between two sqrt prices.
///
/// The pair may be passed in either order. With `round_up = false` both
/// divisions floor; with `round_up = true` both ceil.
///
/// # Errors
/// - [`MathError::InvalidRatio`] if either ratio is zero
/// - [`MathError::ArithmeticOverflow`] if the amount exceeds 256 bits
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    let numerator1 = U512::from(liquidity) << RESOLUTION;
    let numerator2 = U512::from(sqrt_ratio_b_x96 - sqrt_ratio_a_x96);

    let scaled = mul_div_wide(numerator1, numerator2, U512::from(sqrt_ratio_b_x96), round_up)?;
    let amount0 = mul_div_wide(scaled, U512::from(1u64), U512::from(sqrt_ratio_a_x96), round_up)?;

    narrow(amount0)
}

/// Amount of token1 represented by `liquidity` between two sqrt prices.
///
/// The pair may be passed in either order. `round_up` selects ceiling over
/// floor for the final division by 2^96.
///
/// # Errors
/// - [`MathError::InvalidRatio`] if either ratio is zero
/// - [`MathError::ArithmeticOverflow`] if the amount exceeds 256 bits
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<U256, MathError> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    let amount1 = mul_div_wide(
        U512::from(liquidity),
        U512::from(sqrt_ratio_b_x96 - sqrt_ratio_a_x96),
        U512::from(Q96),
        round_up,
    )?;

    narrow(amount1)
}
