//! Token amounts held by a liquidity position at the current pool tick.
//!
//! Where the current tick sits relative to `[tick_lower, tick_upper)` decides
//! which sqrt-price interval each token is measured over:
//!
//! | current tick              | amount0                    | amount1                    |
//! |---------------------------|----------------------------|----------------------------|
//! | `< tick_lower`            | `delta0(lower, upper)`     | `0`                        |
//! | `[tick_lower, tick_upper)`| `delta0(current, upper)`   | `delta1(lower, current)`   |
//! | `>= tick_upper`           | `0`                        | `delta1(lower, upper)`     |
//!
//! All deltas round down.

use alloy::primitives::U256;
use serde::Serialize;

use super::error::MathError;
use super::sqrt_price_math::{get_amount0_delta, get_amount1_delta};
use super::tick_math::{get_sqrt_ratio_at_tick, MAX_TICK, MIN_TICK};

/// Where the current tick falls relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    /// Current tick below the range; the position is entirely token0.
    Below,
    /// Current tick inside the range; the position holds both tokens.
    InRange,
    /// Current tick at or above the upper tick; the position is entirely token1.
    Above,
}

impl RangeStatus {
    /// Classifies `current_tick` against `[tick_lower, tick_upper)`.
    pub fn classify(tick_lower: i32, tick_upper: i32, current_tick: i32) -> Self {
        if current_tick < tick_lower {
            RangeStatus::Below
        } else if current_tick < tick_upper {
            RangeStatus::InRange
        } else {
            RangeStatus::Above
        }
    }
}

fn check_tick(tick: i32) -> Result<(), MathError> {
    if (MIN_TICK..=MAX_TICK).contains(&tick) {
        Ok(())
    } else {
        Err(MathError::InvalidTick(tick))
    }
}

/// Validates all three ticks and the range ordering, then classifies.
fn validate(tick_lower: i32, tick_upper: i32, current_tick: i32) -> Result<RangeStatus, MathError> {
    check_tick(tick_lower)?;
    check_tick(tick_upper)?;
    check_tick(current_tick)?;

    if tick_lower > tick_upper {
        return Err(MathError::InvalidRange {
            lower: tick_lower,
            upper: tick_upper,
        });
    }

    Ok(RangeStatus::classify(tick_lower, tick_upper, current_tick))
}

/// Amount of token0 owed to `liquidity` over `[tick_lower, tick_upper)` at `current_tick`.
///
/// # Errors
/// - [`MathError::InvalidTick`] if any tick is outside the valid range
/// - [`MathError::InvalidRange`] if `tick_lower > tick_upper`
/// - [`MathError::ArithmeticOverflow`] if the amount exceeds 256 bits
pub fn get_amount0(
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    liquidity: U256,
) -> Result<U256, MathError> {
    match validate(tick_lower, tick_upper, current_tick)? {
        RangeStatus::Below => get_amount0_delta(
            get_sqrt_ratio_at_tick(tick_lower)?,
            get_sqrt_ratio_at_tick(tick_upper)?,
            liquidity,
            false,
        ),
        RangeStatus::InRange => get_amount0_delta(
            get_sqrt_ratio_at_tick(current_tick)?,
            get_sqrt_ratio_at_tick(tick_upper)?,
            liquidity,
            false,
        ),
        RangeStatus::Above => Ok(U256::ZERO),
    }
}

/// Amount of token1 owed to `liquidity` over `[tick_lower, tick_upper)` at `current_tick`.
///
/// # Errors
/// Same as [`get_amount0`].
pub fn get_amount1(
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    liquidity: U256,
) -> Result<U256, MathError> {
    match validate(tick_lower, tick_upper, current_tick)? {
        RangeStatus::Below => Ok(U256::ZERO),
        RangeStatus::InRange => get_amount1_delta(
            get_sqrt_ratio_at_tick(tick_lower)?,
            get_sqrt_ratio_at_tick(current_tick)?,
            liquidity,
            false,
        ),
        RangeStatus::Above => get_amount1_delta(
            get_sqrt_ratio_at_tick(tick_lower)?,
            get_sqrt_ratio_at_tick(tick_upper)?,
            liquidity,
            false,
        ),
    }
}

/// Both token amounts at once, computing each distinct sqrt ratio a single time.
///
/// Returns `(amount0, amount1)`, identical to calling [`get_amount0`] and
/// [`get_amount1`] separately.
pub fn get_amounts(
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    liquidity: U256,
) -> Result<(U256, U256), MathError> {
    let status = validate(tick_lower, tick_upper, current_tick)?;

    let sqrt_ratio_a_x96 = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_ratio_b_x96 = get_sqrt_ratio_at_tick(tick_upper)?;

    match status {
        RangeStatus::Below => {
            let amount0 = get_amount0_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, false)?;
            Ok((amount0, U256::ZERO))
        }
        RangeStatus::InRange => {
            let sqrt_ratio_x96 = get_sqrt_ratio_at_tick(current_tick)?;
            let amount0 = get_amount0_delta(sqrt_ratio_x96, sqrt_ratio_b_x96, liquidity, false)?;
            let amount1 = get_amount1_delta(sqrt_ratio_a_x96, sqrt_ratio_x96, liquidity, false)?;
            Ok((amount0, amount1))
        }
        RangeStatus::Above => {
            let amount1 = get_amount1_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, false)?;
            Ok((U256::ZERO, amount1))
        }
    }
}
