//! Type conversion and formatting utilities.
//!
//! Functions for converting raw on-chain integers (U256) into decimal-adjusted
//! token amounts, and for parsing the string encodings events carry them in.

use alloy::primitives::{hex, U256};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;

// ============================================
// Hex Encoding
// ============================================

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ============================================
// Parsing
// ============================================

/// Parse a U256 from a decimal string or a `0x`-prefixed hex string.
///
/// Surrounding whitespace is ignored. Returns `None` for empty input,
/// invalid digits, or values that do not fit in 256 bits.
pub fn parse_u256(value: &str) -> Option<U256> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) if !digits.is_empty() => U256::from_str_radix(digits, 16).ok(),
        Some(_) => None,
        None => U256::from_str_radix(value, 10).ok(),
    }
}

// ============================================
// U256 Conversions
// ============================================

/// Convert a U256 into an exact BigDecimal shifted by `decimals` places.
///
/// `u256_to_big_decimal(1_500_000, 6)` is `1.5`. No precision is lost.
pub fn u256_to_big_decimal(value: U256, decimals: u8) -> BigDecimal {
    // bytes are cheaper than going through a decimal string
    let bytes: [u8; 32] = value.to_le_bytes();
    let digits = BigInt::from_bytes_le(Sign::Plus, &bytes);
    BigDecimal::new(digits, decimals as i64)
}

/// Convert U256 to f64 with decimal adjustment.
///
/// The adjustment is done in BigDecimal before the final cast, so large raw
/// amounts keep their leading digits. Returns `None` if the result is not a
/// finite f64.
pub fn u256_to_f64(value: U256, decimals: u8) -> Option<f64> {
    let result = u256_to_big_decimal(value, decimals).to_f64()?;

    if result.is_finite() {
        Some(result)
    } else {
        None
    }
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 37]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u32) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_u256_decimal_and_hex() {
        assert_eq!(parse_u256("1000000"), Some(U256::from(1_000_000u64)));
        assert_eq!(parse_u256(" 42 "), Some(U256::from(42u64)));
        assert_eq!(parse_u256("0xff"), Some(U256::from(255u64)));
        assert_eq!(parse_u256("0XFF"), Some(U256::from(255u64)));
        assert_eq!(
            parse_u256("115792089237316195423570985008687907853269984665640564039457584007913129639935"),
            Some(U256::MAX)
        );
    }

    #[test]
    fn test_parse_u256_rejects_garbage() {
        assert_eq!(parse_u256(""), None);
        assert_eq!(parse_u256("0x"), None);
        assert_eq!(parse_u256("-1"), None);
        assert_eq!(parse_u256("12abc"), None);
        // 2^256
        assert_eq!(
            parse_u256("115792089237316195423570985008687907853269984665640564039457584007913129639936"),
            None
        );
    }

    #[test]
    fn test_u256_to_big_decimal_is_exact() {
        let value = u256_to_big_decimal(U256::from(1_500_000u64), 6);
        assert_eq!(value, BigDecimal::from_str("1.5").unwrap());

        let max = u256_to_big_decimal(U256::MAX, 0);
        assert_eq!(
            max,
            BigDecimal::from_str(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_u256_to_f64() {
        let one_eth = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(u256_to_f64(one_eth, 18), Some(1.0));
        assert_eq!(u256_to_f64(U256::ZERO, 18), Some(0.0));
        assert_eq!(u256_to_f64(U256::from(999u64), 3), Some(0.999));
    }

    #[test]
    fn test_big_pow10() {
        assert_eq!(big_pow10(0), BigDecimal::from(1));
        assert_eq!(big_pow10(6), BigDecimal::from(1_000_000));
        assert_eq!(big_pow10(40), BigDecimal::from_str("1e40").unwrap());
    }

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex_encode(&[0xde, 0xad, 0xbe, 0xef]), "0xdeadbeef");
    }
}
