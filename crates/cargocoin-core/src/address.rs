// crates/cargocoin-core/src/address.rs
//
// 20-byte account identifier. The ledger treats addresses as opaque beyond
// equality and ordering; the all-zero address is the null address.

use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// An account address on the ledger.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Address(pub H160);

impl Address {
    /// Length of an address in bytes.
    pub const LEN: usize = 20;

    /// The null address.
    pub fn zero() -> Self {
        Self(H160::zero())
    }

    /// Whether this is the null address.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Build an address with every byte set to `byte`. Handy for fixtures.
    pub fn repeat_byte(byte: u8) -> Self {
        Self(H160::repeat_byte(byte))
    }

    /// Raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    /// Parse a hex address with or without the `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits)?;
        if bytes.len() != Self::LEN {
            return Err(LedgerError::Serialization(format!(
                "Expected a {}-byte address, got {} bytes",
                Self::LEN,
                bytes.len()
            )));
        }
        Ok(Self(H160::from_slice(&bytes)))
    }
}

impl From<H160> for Address {
    fn from(h: H160) -> Self {
        Self(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::zero().is_zero());
        assert!(!Address::repeat_byte(1).is_zero());
    }

    #[test]
    fn test_display_full_hex() {
        let addr = Address::repeat_byte(0xab);
        assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let with: Address = "0x0101010101010101010101010101010101010101".parse().unwrap();
        let without: Address = "0101010101010101010101010101010101010101".parse().unwrap();
        assert_eq!(with, without);
        assert_eq!(with, Address::repeat_byte(1));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("0x0102".parse::<Address>().is_err());
        assert!("0xzz".parse::<Address>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr = Address::repeat_byte(2);
        let json = serde_json::to_string(&addr).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
