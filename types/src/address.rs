//! 20-byte account address type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 20-byte account address, derived from a secp256k1 public key.
///
/// Displayed and serialized as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

/// Error returned when parsing a hex address string fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid address: {0}")]
pub struct AddressParseError(pub String);

impl Address {
    /// Length of an address in bytes.
    pub const LEN: usize = 20;

    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address from a byte slice; fails unless it is exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressParseError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressParseError(format!("expected 20 bytes, got {}", bytes.len())))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() != 40 {
            return Err(AddressParseError(format!(
                "expected 40 hex characters, got {}",
                stripped.len()
            )));
        }
        let bytes = hex::decode(stripped).map_err(|e| AddressParseError(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

// String-based serde so addresses can be used as JSON map keys.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_prefixed_hex() {
        let addr = Address::new([0xab; 20]);
        assert_eq!(
            addr.to_string(),
            "0xabababababababababababababababababababab"
        );
    }

    #[test]
    fn parse_roundtrip() {
        let addr = Address::new([0x12; 20]);
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn parse_accepts_unprefixed() {
        let parsed: Address = "abababababababababababababababababababab".parse().unwrap();
        assert_eq!(parsed, Address::new([0xab; 20]));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("0x1234".parse::<Address>().is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!("0xzzababababababababababababababababababab"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn from_slice_rejects_short_input() {
        assert!(Address::from_slice(&[0u8; 19]).is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr = Address::new([0x01; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0101010101010101010101010101010101010101\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1u8; 20]).is_zero());
    }
}
