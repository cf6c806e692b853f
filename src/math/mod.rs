//! Exact fixed-point math for liquidity positions.
//!
//! This module is organized into focused submodules:
//!
//! - [`tick_math`] - Tick index <-> Q64.96 sqrt price ratio
//! - [`sqrt_price_math`] - Token amount deltas between two sqrt prices
//! - [`liquidity_amounts`] - Position amounts from a tick range and current tick
//! - [`full_math`] - 512-bit multiply/divide helpers
//!
//! Everything here is pure and stateless: no I/O, no logging, no shared
//! mutable state. Failures are returned as [`MathError`].

mod error;
mod full_math;
mod liquidity_amounts;
mod sqrt_price_math;
mod tick_math;

// ============================================
// Re-exports
// ============================================

pub use error::MathError;

// Full-width arithmetic
pub use full_math::{div_rounding_up, mul_div, mul_div_rounding_up};

// Tick math
pub use tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};

// Amount deltas
pub use sqrt_price_math::{get_amount0_delta, get_amount1_delta, Q96, RESOLUTION};

// Position amounts
pub use liquidity_amounts::{get_amount0, get_amount1, get_amounts, RangeStatus};
