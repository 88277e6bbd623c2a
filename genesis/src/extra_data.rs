//! Clique `extraData` encoding.
//!
//! Layout: `vanity (32 bytes, zeroed) || address_0 .. address_{N-1} || seal (65
//! bytes, zeroed)`. The seal is a placeholder for the block signature and stays
//! zero in genesis. Validator addresses appear in exactly the order they were
//! generated; the encoder never sorts or deduplicates (a duplicate or zero
//! address in the signer set is the caller's responsibility).

use poaforge_types::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::GenesisError;

/// Vanity prefix length in bytes.
pub const VANITY_LEN: usize = 32;
/// Seal placeholder length in bytes.
pub const SEAL_LEN: usize = 65;

/// The fixed-layout `extraData` byte buffer of a Clique genesis block.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtraData(Vec<u8>);

impl ExtraData {
    /// Encode an ordered validator set.
    ///
    /// The result is exactly `32 + 20*N + 65` bytes; an empty set yields the
    /// 97-byte frame with no signers.
    pub fn encode(validators: &[Address]) -> Self {
        let mut buf = vec![0u8; VANITY_LEN + Address::LEN * validators.len() + SEAL_LEN];
        for (i, validator) in validators.iter().enumerate() {
            let start = VANITY_LEN + Address::LEN * i;
            buf[start..start + Address::LEN].copy_from_slice(validator.as_bytes());
        }
        Self(buf)
    }

    /// Decode the validator set back out of the buffer.
    ///
    /// Fails when the length does not fit the `32 + 20*N + 65` layout.
    pub fn validators(&self) -> Result<Vec<Address>, GenesisError> {
        let min_len = VANITY_LEN + SEAL_LEN;
        if self.0.len() < min_len || (self.0.len() - min_len) % Address::LEN != 0 {
            return Err(GenesisError::MalformedExtraData(format!(
                "length {} does not fit 32 + 20*N + 65",
                self.0.len()
            )));
        }
        self.0[VANITY_LEN..self.0.len() - SEAL_LEN]
            .chunks(Address::LEN)
            .map(|chunk| {
                Address::from_slice(chunk)
                    .map_err(|e| GenesisError::MalformedExtraData(e.to_string()))
            })
            .collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ExtraData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for ExtraData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtraData({} bytes)", self.0.len())
    }
}

impl FromStr for ExtraData {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(stripped).map_err(|e| GenesisError::MalformedExtraData(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for ExtraData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExtraData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
