//! Genesis document model with the geth-compatible JSON wire format.

use poaforge_types::{Address, WeiAmount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GenesisError;
use crate::extra_data::ExtraData;

/// Clique checkpoint interval in blocks; fixed for every generated network.
pub const CLIQUE_EPOCH: u64 = 30_000;

/// Default genesis block gas limit.
pub const DEFAULT_GAS_LIMIT: u64 = 0x1000000;

/// Numeric configuration feeding [`GenesisDocument::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisParams {
    /// Network chain id.
    pub chain_id: u64,
    /// Clique block period in seconds.
    pub period: u64,
    /// Genesis block gas limit.
    pub gas_limit: u64,
    /// Initial balance allocated to every validator address.
    pub initial_balance: WeiAmount,
}

/// Chain configuration section of the genesis document.
///
/// Every pre-merge hard fork activates at block 0: a generated test network
/// never transitions, it starts at the final protocol ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: u64,
    pub homestead_block: u64,
    pub eip150_block: u64,
    pub eip155_block: u64,
    pub eip158_block: u64,
    pub byzantium_block: u64,
    pub constantinople_block: u64,
    pub petersburg_block: u64,
    pub clique: CliqueConfig,
}

/// Clique consensus tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueConfig {
    /// Target block time in seconds.
    pub period: u64,
    /// Checkpoint interval in blocks.
    pub epoch: u64,
}

/// One account allocation in the genesis state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub balance: WeiAmount,
}

/// The full genesis document.
///
/// Immutable after [`GenesisDocument::build`]; serialize once and hand the
/// same bytes to every node, otherwise the network partitions at genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisDocument {
    pub config: ChainConfig,
    #[serde(with = "quantity")]
    pub nonce: u64,
    #[serde(with = "quantity")]
    pub timestamp: u64,
    #[serde(rename = "extraData")]
    pub extra_data: ExtraData,
    #[serde(rename = "gasLimit", with = "quantity")]
    pub gas_limit: u64,
    #[serde(with = "quantity")]
    pub difficulty: u64,
    pub alloc: BTreeMap<Address, GenesisAccount>,
}

impl GenesisDocument {
    /// Assemble a genesis document from parameters, the validator address set,
    /// and the pre-encoded `extraData`.
    ///
    /// The allocation map is keyed by address: a duplicate address in the list
    /// overwrites its earlier entry (last write wins). Callers that consider
    /// duplicates an error must reject them before building.
    pub fn build(params: &GenesisParams, addresses: &[Address], extra_data: ExtraData) -> Self {
        let mut alloc = BTreeMap::new();
        for address in addresses {
            alloc.insert(
                *address,
                GenesisAccount {
                    balance: params.initial_balance,
                },
            );
        }

        Self {
            config: ChainConfig {
                chain_id: params.chain_id,
                homestead_block: 0,
                eip150_block: 0,
                eip155_block: 0,
                eip158_block: 0,
                byzantium_block: 0,
                constantinople_block: 0,
                petersburg_block: 0,
                clique: CliqueConfig {
                    period: params.period,
                    epoch: CLIQUE_EPOCH,
                },
            },
            nonce: 0,
            timestamp: 0,
            extra_data,
            gas_limit: params.gas_limit,
            difficulty: 1,
            alloc,
        }
    }

    /// Serialize to the JSON wire format.
    ///
    /// Deterministic: the allocation map is ordered, so identical documents
    /// always produce identical bytes.
    pub fn to_json(&self) -> Result<String, GenesisError> {
        serde_json::to_string_pretty(self).map_err(|e| GenesisError::Serialization(e.to_string()))
    }

    /// Parse a genesis document from its JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        serde_json::from_str(json).map_err(|e| GenesisError::Serialization(e.to_string()))
    }
}

/// Serde codec for the `0x`-hex quantity fields (`nonce`, `timestamp`,
/// `gasLimit`, `difficulty`). Deserialization also accepts bare numbers.
mod quantity {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("0x{:x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        struct QuantityVisitor;

        impl serde::de::Visitor<'_> for QuantityVisitor {
            type Value = u64;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a 0x-hex string or integer")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let result = match v.strip_prefix("0x") {
                    Some(hex_part) => u64::from_str_radix(hex_part, 16),
                    None => v.parse::<u64>(),
                };
                result.map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(v)
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}
