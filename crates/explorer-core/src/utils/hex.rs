//! Hex quantity helpers for Ethereum JSON-RPC values.
//!
//! Quantities (`"0x1a"`) are decoded into `u64` or [`U256`]; never through a
//! float, so values above 2^53 survive unchanged.

use primitive_types::U256;

/// Parses a `0x`-prefixed hex quantity into a `u64`.
///
/// # Examples
/// ```
/// use explorer_core::utils::hex::hex_to_u64;
///
/// assert_eq!(hex_to_u64("0x112a880"), Some(18_000_000));
/// assert_eq!(hex_to_u64("112a880"), None);
/// ```
#[must_use]
pub fn hex_to_u64(s: &str) -> Option<u64> {
    let hex_str = s.strip_prefix("0x")?;
    if hex_str.is_empty() || !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(hex_str, 16).ok()
}

/// Parses a `0x`-prefixed hex quantity into a [`U256`].
///
/// Accepts odd-length values such as `"0x0"` or `"0xde0b6b3a7640000"` and
/// rejects anything longer than 64 hex digits.
#[must_use]
pub fn hex_to_u256(s: &str) -> Option<U256> {
    let hex_str = s.strip_prefix("0x")?;
    if hex_str.is_empty() || hex_str.len() > 64 || !hex_str.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }
    U256::from_str_radix(hex_str, 16).ok()
}

/// Formats a `u64` as a hex quantity. Zero is formatted as `"0x0"`.
#[must_use]
pub fn format_hex_u64(value: u64) -> String {
    format!("0x{value:x}")
}
