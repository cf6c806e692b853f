use serde::{Deserialize, Serialize};

use crate::math::RangeStatus;
use crate::utils::PoolKey;

/// A liquidity position observed at a given pool tick.
///
/// Decoded from one JSON line. `liquidity` is a string so values beyond 2^53
/// survive JSON; it may be decimal or `0x` hex.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionEvent {
    pub token_id: String,
    #[serde(default)]
    pub pool_key: Option<PoolKey>,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub current_tick: i32,
    pub liquidity: String,
    #[serde(default)]
    pub token0_decimals: Option<u8>,
    #[serde(default)]
    pub token1_decimals: Option<u8>,
}

/// Token amounts owed to a position, emitted as one JSON line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PositionAmounts {
    pub token_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub current_tick: i32,
    pub status: RangeStatus,
    /// Raw amount as a decimal string
    pub amount0: String,
    pub amount1: String,
    pub amount0_adjusted: Option<f64>,
    pub amount1_adjusted: Option<f64>,
    /// Price of token0 in token1 at the current tick
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
