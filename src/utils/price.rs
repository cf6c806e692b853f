//! Price conversion utilities for Uniswap V3/V4.
//!
//! Functions for converting sqrtPriceX96 values to decimal-adjusted prices
//! and for valuing token amounts in USD.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

use super::conversion::big_pow10;

/// Token decimals above this are rejected as malformed metadata.
const MAX_TOKEN_DECIMALS: u8 = 36;

// ============================================
// sqrtPriceX96 to Price Conversion
// ============================================

/// Convert a Q64.96 sqrt price into the price of token0 denominated in token1,
/// adjusted for both tokens' decimals.
///
/// price = (sqrtPriceX96 / 2^96)^2 * 10^(decimals0 - decimals1)
///
/// The square is taken on the exact integer before dividing by 2^192.
///
/// # Returns
/// * `Some(price)` for a non-zero ratio that converts to a finite f64,
///   `None` otherwise
pub fn sqrt_price_x96_to_price(
    sqrt_price_x96: U256,
    token0_decimals: u8,
    token1_decimals: u8,
) -> Option<f64> {
    if sqrt_price_x96.is_zero()
        || token0_decimals > MAX_TOKEN_DECIMALS
        || token1_decimals > MAX_TOKEN_DECIMALS
    {
        return None;
    }

    let sqrt_price = BigInt::from_bytes_le(Sign::Plus, &sqrt_price_x96.to_le_bytes::<32>());
    let q192 = BigInt::from(1u8) << 192usize;

    // raw_price = sqrtPriceX96^2 / 2^192
    let raw_price = BigDecimal::from(&sqrt_price * &sqrt_price) / BigDecimal::from(q192);

    let decimal_diff = token0_decimals as i32 - token1_decimals as i32;
    let adjusted = if decimal_diff >= 0 {
        raw_price * big_pow10(decimal_diff as u32)
    } else {
        raw_price / big_pow10((-decimal_diff) as u32)
    };

    let price = adjusted.to_f64()?;
    if price.is_finite() && price > 0.0 {
        Some(price)
    } else {
        None
    }
}

// ============================================
// USD Valuation
// ============================================

/// USD value of a pair of token amounts priced through the native token.
///
/// amount0 * token0DerivedNative * nativePriceUsd + amount1 * token1DerivedNative * nativePriceUsd
pub fn calculate_amount_usd(
    amount0: &BigDecimal,
    amount1: &BigDecimal,
    token0_derived_native: &BigDecimal,
    token1_derived_native: &BigDecimal,
    native_price_usd: &BigDecimal,
) -> BigDecimal {
    if native_price_usd.is_zero() {
        return BigDecimal::zero();
    }

    let value0 = amount0 * token0_derived_native * native_price_usd;
    let value1 = amount1 * token1_derived_native * native_price_usd;

    value0 + value1
}
