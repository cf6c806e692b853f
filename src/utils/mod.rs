//! Utility functions for the positions indexer.
//!
//! This module is organized into focused submodules:
//!
//! - [`conversion`] - Type conversions (U256 parsing, BigDecimal/f64, hex encoding)
//! - [`price`] - Price conversion utilities (sqrtPriceX96, USD valuation)
//! - [`pool_id`] - Uniswap V4 pool key and pool ID computation

mod conversion;
mod pool_id;
mod price;

// ============================================
// Re-exports
// ============================================

// Conversion utilities
pub use conversion::{hex_encode, parse_u256, u256_to_big_decimal, u256_to_f64};

// Pool ID utilities (V4)
pub use pool_id::{PoolKey, PoolKeyError};

// Price conversion utilities
pub use price::{calculate_amount_usd, sqrt_price_x96_to_price};
