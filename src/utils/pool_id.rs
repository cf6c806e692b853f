//! Uniswap V4 pool key and pool ID utilities.

use alloy::primitives::{keccak256, Address};
use alloy::sol_types::SolValue;
use serde::Deserialize;
use thiserror::Error;

use super::conversion::hex_encode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolKeyError {
    #[error("invalid {field} address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },
}

/// The pool key a position is minted against, as carried by the position
/// manager's `MintPosition` config.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PoolKey {
    pub currency0: String,
    pub currency1: String,
    /// Pool fee in hundredths of a bip (e.g., 3000 = 0.30%)
    pub fee: u32,
    pub tick_spacing: i32,
    /// Hook contract address (zero address if no hooks)
    pub hooks: String,
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, PoolKeyError> {
    value.parse().map_err(|_| PoolKeyError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

impl PoolKey {
    /// Compute the pool ID.
    ///
    /// ```text
    /// keccak256(abi.encode(currency0, currency1, fee, tickSpacing, hooks))
    /// ```
    ///
    /// Currencies are sorted by address first, so the key is the same whichever
    /// order the event lists them in. The ID is lowercase hex with a 0x prefix.
    pub fn id(&self) -> Result<String, PoolKeyError> {
        let addr_a = parse_address("currency0", &self.currency0)?;
        let addr_b = parse_address("currency1", &self.currency1)?;
        let hooks = parse_address("hooks", &self.hooks)?;

        let (currency0, currency1) = if addr_a < addr_b { (addr_a, addr_b) } else { (addr_b, addr_a) };

        // uint24 / int24 encode identically to u32 / i32 in a 32-byte word
        let encoded = (currency0, currency1, self.fee, self.tick_spacing, hooks).abi_encode();

        Ok(hex_encode(keccak256(&encoded).as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIVE: &str = "0x0000000000000000000000000000000000000000";
    const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

    fn key(currency0: &str, currency1: &str, hooks: &str) -> PoolKey {
        PoolKey {
            currency0: currency0.to_string(),
            currency1: currency1.to_string(),
            fee: 3000,
            tick_spacing: 60,
            hooks: hooks.to_string(),
        }
    }

    #[test]
    fn test_pool_id_sorting() {
        let id1 = key(NATIVE, USDC, NATIVE).id().unwrap();
        let id2 = key(USDC, NATIVE, NATIVE).id().unwrap();
        assert_eq!(id1, id2);
        assert_eq!(id1.len(), 66);
        assert!(id1.starts_with("0x"));
    }

    #[test]
    fn test_different_hooks_produce_different_ids() {
        let no_hooks = key(NATIVE, USDC, NATIVE).id().unwrap();
        let with_hooks = key(NATIVE, USDC, "0x1234567890abcdef1234567890abcdef12345678").id().unwrap();
        assert_ne!(no_hooks, with_hooks);
    }

    #[test]
    fn test_tick_spacing_changes_id() {
        let mut other = key(NATIVE, USDC, NATIVE);
        other.tick_spacing = 10;
        assert_ne!(key(NATIVE, USDC, NATIVE).id().unwrap(), other.id().unwrap());
    }

    #[test]
    fn test_invalid_address_is_an_error() {
        let err = key("not-an-address", USDC, NATIVE).id().unwrap_err();
        assert_eq!(
            err,
            PoolKeyError::InvalidAddress {
                field: "currency0",
                value: "not-an-address".to_string()
            }
        );
    }
}
