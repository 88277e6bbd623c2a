//! Network configuration with TOML file support.
//!
//! One explicit, validated struct supplied to [`crate::NetworkPlan::new`];
//! there is no hidden process-wide configuration state. Defaults mirror the
//! conventional three-node local Clique setup.

use poaforge_crypto::KeyError;
use poaforge_genesis::{GenesisParams, DEFAULT_GAS_LIMIT};
use poaforge_types::WeiAmount;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::PlanError;
use crate::ports::BasePorts;

/// Configuration for one network generation run.
///
/// Can be loaded from a TOML file via [`NetworkConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of validator nodes. Ignored when `node_names` is non-empty.
    #[serde(default = "default_node_count")]
    pub node_count: usize,

    /// Explicit node names; empty means `node1..nodeN` from `node_count`.
    #[serde(default)]
    pub node_names: Vec<String>,

    /// Clique block period in seconds.
    #[serde(default = "default_period")]
    pub period: u64,

    /// Network chain id.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Genesis block gas limit.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Initial balance per validator, in whole ETH.
    #[serde(default = "default_initial_balance_eth")]
    pub initial_balance_eth: u128,

    /// Password protecting the per-node keystore files.
    #[serde(default = "default_password")]
    pub password: String,

    /// BIP-39 mnemonic for deterministic validator keys; absent means
    /// random generation.
    #[serde(default)]
    pub mnemonic: Option<String>,

    /// Base P2P port; node `i` listens on `p2p_port + i`.
    #[serde(default = "default_p2p_port")]
    pub p2p_port: u16,

    /// Base HTTP-RPC port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Base Auth-RPC port.
    #[serde(default = "default_auth_rpc_port")]
    pub auth_rpc_port: u16,

    /// Hex-encoded static bootnode key; absent means freshly generated.
    #[serde(default)]
    pub bootnode_key: Option<String>,

    /// Bind address for the bootnode, an IPv4/IPv6 literal.
    #[serde(default = "default_bootnode_address")]
    pub bootnode_address: String,

    /// UDP discovery port for the bootnode.
    #[serde(default = "default_discovery_port")]
    pub discovery_port: u16,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_node_count() -> usize {
    3
}

fn default_period() -> u64 {
    5
}

fn default_chain_id() -> u64 {
    1337
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_initial_balance_eth() -> u128 {
    1_000_000_000
}

fn default_password() -> String {
    "asdasdasd".to_string()
}

fn default_p2p_port() -> u16 {
    30305
}

fn default_http_port() -> u16 {
    8546
}

fn default_auth_rpc_port() -> u16 {
    8090
}

fn default_bootnode_address() -> String {
    "127.0.0.1".to_string()
}

fn default_discovery_port() -> u16 {
    30305
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NetworkConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, PlanError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PlanError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PlanError> {
        toml::from_str(s).map_err(|e| PlanError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NetworkConfig is always serializable to TOML")
    }

    /// The effective node name list: explicit names, or `node1..nodeN`.
    pub fn resolved_node_names(&self) -> Vec<String> {
        if self.node_names.is_empty() {
            (1..=self.node_count).map(|i| format!("node{}", i)).collect()
        } else {
            self.node_names.clone()
        }
    }

    pub fn base_ports(&self) -> BasePorts {
        BasePorts {
            p2p: self.p2p_port,
            http: self.http_port,
            auth_rpc: self.auth_rpc_port,
        }
    }

    /// Numeric genesis parameters derived from this configuration.
    pub fn genesis_params(&self) -> Result<GenesisParams, PlanError> {
        let initial_balance = WeiAmount::from_eth(self.initial_balance_eth).ok_or_else(|| {
            PlanError::InvalidRange(format!(
                "initial balance {} ETH overflows u128 wei",
                self.initial_balance_eth
            ))
        })?;
        Ok(GenesisParams {
            chain_id: self.chain_id,
            period: self.period,
            gas_limit: self.gas_limit,
            initial_balance,
        })
    }

    /// Validate the whole configuration before any artifact generation begins.
    ///
    /// Every malformed input is surfaced here rather than mid-run.
    pub fn validate(&self) -> Result<(), PlanError> {
        let names = self.resolved_node_names();
        if names.is_empty() {
            return Err(PlanError::InvalidRange(
                "node count must be at least 1".into(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(PlanError::Config("node names must be non-empty".into()));
            }
            if !seen.insert(name) {
                return Err(PlanError::Config(format!("duplicate node name: {}", name)));
            }
        }

        if self.password.is_empty() {
            return Err(PlanError::Config(
                "keystore password must be non-empty".into(),
            ));
        }

        if let Some(phrase) = &self.mnemonic {
            if !poaforge_crypto::validate_mnemonic(phrase) {
                return Err(KeyError::InvalidMnemonic(
                    "not a valid BIP-39 phrase".to_string(),
                )
                .into());
            }
        }

        if let Some(key_hex) = &self.bootnode_key {
            poaforge_crypto::parse_private_key(key_hex)?;
        }

        if self.bootnode_address.parse::<std::net::IpAddr>().is_err() {
            return Err(PlanError::InvalidAddress(self.bootnode_address.clone()));
        }

        self.genesis_params()?;
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_count: default_node_count(),
            node_names: Vec::new(),
            period: default_period(),
            chain_id: default_chain_id(),
            gas_limit: default_gas_limit(),
            initial_balance_eth: default_initial_balance_eth(),
            password: default_password(),
            mnemonic: None,
            p2p_port: default_p2p_port(),
            http_port: default_http_port(),
            auth_rpc_port: default_auth_rpc_port(),
            bootnode_key: None,
            bootnode_address: default_bootnode_address(),
            discovery_port: default_discovery_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NetworkConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = NetworkConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.chain_id, config.chain_id);
        assert_eq!(parsed.p2p_port, config.p2p_port);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NetworkConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.node_count, 3);
        assert_eq!(config.period, 5);
        assert_eq!(config.chain_id, 1337);
        assert_eq!(config.p2p_port, 30305);
        assert_eq!(config.http_port, 8546);
        assert_eq!(config.auth_rpc_port, 8090);
        assert_eq!(config.discovery_port, 30305);
        assert_eq!(config.initial_balance_eth, 1_000_000_000);
        assert_eq!(config.bootnode_address, "127.0.0.1");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            node_count = 5
            chain_id = 9999
        "#;
        let config = NetworkConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.node_count, 5);
        assert_eq!(config.chain_id, 9999);
        assert_eq!(config.period, 5); // default
    }

    #[test]
    fn resolved_names_default_to_numbered() {
        let config = NetworkConfig::default();
        assert_eq!(config.resolved_node_names(), vec!["node1", "node2", "node3"]);
    }

    #[test]
    fn explicit_names_win_over_count() {
        let config = NetworkConfig {
            node_count: 7,
            node_names: vec!["alpha".into(), "beta".into()],
            ..Default::default()
        };
        assert_eq!(config.resolved_node_names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn default_config_validates() {
        NetworkConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_nodes_rejected() {
        let config = NetworkConfig {
            node_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlanError::InvalidRange(_))
        ));
    }

    #[test]
    fn duplicate_node_names_rejected() {
        let config = NetworkConfig {
            node_names: vec!["a".into(), "a".into()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PlanError::Config(_))));
    }

    #[test]
    fn empty_password_rejected() {
        let config = NetworkConfig {
            password: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PlanError::Config(_))));
    }

    #[test]
    fn invalid_mnemonic_rejected() {
        let config = NetworkConfig {
            mnemonic: Some("definitely not a mnemonic".into()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PlanError::Key(_))));
    }

    #[test]
    fn invalid_bootnode_key_rejected() {
        let config = NetworkConfig {
            bootnode_key: Some("zz".repeat(32)),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PlanError::Key(_))));
    }

    #[test]
    fn invalid_bootnode_address_rejected() {
        let config = NetworkConfig {
            bootnode_address: "not-an-ip".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PlanError::InvalidAddress(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NetworkConfig::from_toml_file("/nonexistent/poaforge.toml");
        assert!(matches!(result, Err(PlanError::Config(_))));
    }

    #[test]
    fn genesis_params_carry_configured_values() {
        let config = NetworkConfig {
            chain_id: 1234,
            period: 15,
            initial_balance_eth: 2,
            ..Default::default()
        };
        let params = config.genesis_params().unwrap();
        assert_eq!(params.chain_id, 1234);
        assert_eq!(params.period, 15);
        assert_eq!(params.initial_balance, WeiAmount::from_eth(2).unwrap());
    }
}
