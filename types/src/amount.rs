//! Wei-denominated balance amounts.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid floating-point
//! errors. The smallest unit is 1 wei; 1 ETH = 10^18 wei. The genesis wire format
//! carries balances as decimal strings, so serde goes through `Display`/`FromStr`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wei per ETH (10^18).
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// A wei-denominated balance.
///
/// Internally stored as raw wei (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeiAmount(u128);

/// Error returned when parsing a balance string fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid wei amount: {0}")]
pub struct WeiParseError(pub String);

impl WeiAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(wei: u128) -> Self {
        Self(wei)
    }

    /// Convert a whole-ETH amount into wei; `None` on u128 overflow.
    pub fn from_eth(eth: u128) -> Option<Self> {
        eth.checked_mul(WEI_PER_ETH).map(Self)
    }

    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WeiAmount {
    type Err = WeiParseError;

    /// Accepts a decimal string or a `0x`-prefixed hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s.strip_prefix("0x") {
            Some(hex_part) => u128::from_str_radix(hex_part, 16),
            None => s.parse::<u128>(),
        };
        value.map(Self).map_err(|e| WeiParseError(e.to_string()))
    }
}

impl Serialize for WeiAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeiAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
