//! Tick math for Uniswap V3/V4 positions.
//!
//! Exact integer port of the on-chain `TickMath` conversion from a tick index
//! to its Q64.96 square-root price ratio. Results are bit-identical to the
//! contract, including its ceiling rounding, so amounts derived from them match
//! what the pool itself would compute.

use alloy::primitives::U256;

use super::error::MathError;

// ============================================
// Range Constants
// ============================================

/// The minimum tick accepted by [`get_sqrt_ratio_at_tick`].
pub const MIN_TICK: i32 = -887272;

/// The maximum tick accepted by [`get_sqrt_ratio_at_tick`].
pub const MAX_TICK: i32 = -MIN_TICK;

/// `get_sqrt_ratio_at_tick(MIN_TICK)` = 4295128739
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);

/// `get_sqrt_ratio_at_tick(MAX_TICK)` = 1461446703485210103287273052203988822378723970342
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([0x5d951d5263988d26, 0xefd1fc6a50648849, 0xfffd8963, 0]);

// ============================================
// Precomputed Constants
// ============================================

/// 2^128, the Q128.128 representation of 1.0
const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);

/// Low 32 bits discarded by the final Q128.128 -> Q64.96 downscale.
const LOW_32_BITS: U256 = U256::from_limbs([0xffff_ffff, 0, 0, 0]);

/// Seed used when bit 0 of the absolute tick is set: 2^128 / sqrt(1.0001).
const RATIO_BIT_0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

// Q128.128 multipliers for bits 1..=19 of the absolute tick.
// Entry i - 1 is 2^128 / sqrt(1.0001)^(2^i). These must match the contract
// table exactly; every derived price depends on them.
const TICK_MULTIPLIERS: [u128; 19] = [
    0xfff97272373d413259a46990580e213a, // bit 1
    0xfff2e50f5f656932ef12357cf3c7fdcc, // bit 2
    0xffe5caca7e10e4e61c3624eaa0941cd0, // bit 3
    0xffcb9843d60f6159c9db58835c926644, // bit 4
    0xff973b41fa98c081472e6896dfb254c0, // bit 5
    0xff2ea16466c96a3843ec78b326b52861, // bit 6
    0xfe5dee046a99a2a811c461f1969c3053, // bit 7
    0xfcbe86c7900a88aedcffc83b479aa3a4, // bit 8
    0xf987a7253ac413176f2b074cf7815e54, // bit 9
    0xf3392b0822b70005940c7a398e4b70f3, // bit 10
    0xe7159475a2c29b7443b29c7fa6e889d9, // bit 11
    0xd097f3bdfd2022b8845ad8f792aa5825, // bit 12
    0xa9f746462d870fdf8a65dc1f90e061e5, // bit 13
    0x70d869a156d2a1b890bb3df62baf32f7, // bit 14
    0x31be135f97d08fd981231505542fcfa6, // bit 15
    0x09aa508b5b7a84e1c677de54f3e99bc9, // bit 16
    0x005d6af8dedb81196699c329225ee604, // bit 17
    0x00002216e584f5fa1ea926041bedfe98, // bit 18
    0x00000000048a170391f7dc42444e8fa2, // bit 19
];

// ============================================
// Tick to Price Conversion
// ============================================

/// Returns the sqrt ratio `sqrt(1.0001)^tick` as a Q64.96 number.
///
/// The power is built from the binary decomposition of `|tick|`: one
/// fixed-point multiply per set bit, each followed by a `>> 128` truncation so
/// the accumulator stays in Q128.128. Positive ticks take the reciprocal, and
/// the result is rounded up when dropping to Q64.96 so it never
/// under-represents the price.
///
/// # Errors
/// [`MathError::InvalidTick`] when `tick` is outside `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::InvalidTick(tick));
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 { U256::from(RATIO_BIT_0) } else { Q128 };

    // ratio <= 2^128 and every multiplier < 2^128, so the product fits in 256 bits
    for (i, multiplier) in TICK_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (1 << (i + 1)) != 0 {
            ratio = (ratio * U256::from(*multiplier)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let round_up = !(ratio & LOW_32_BITS).is_zero();
    let sqrt_ratio_x96 = ratio >> 32;
    if round_up {
        Ok(sqrt_ratio_x96 + U256::from(1u64))
    } else {
        Ok(sqrt_ratio_x96)
    }
}

// ============================================
// Price to Tick Conversion
// ============================================

/// Returns the greatest tick whose sqrt ratio is `<= sqrt_ratio_x96`.
///
/// Bisects over [`get_sqrt_ratio_at_tick`], so the answer is consistent with
/// the forward conversion bit for bit:
/// `get_sqrt_ratio_at_tick(t) <= sqrt_ratio_x96 < get_sqrt_ratio_at_tick(t + 1)`.
///
/// # Errors
/// [`MathError::InvalidRatio`] unless `MIN_SQRT_RATIO <= sqrt_ratio_x96 < MAX_SQRT_RATIO`.
pub fn get_tick_at_sqrt_ratio(sqrt_ratio_x96: U256) -> Result<i32, MathError> {
    if sqrt_ratio_x96 < MIN_SQRT_RATIO || sqrt_ratio_x96 >= MAX_SQRT_RATIO {
        return Err(MathError::InvalidRatio);
    }

    // Invariant: ratio(low) <= sqrt_ratio_x96 < ratio(high)
    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_ratio_x96 {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}
