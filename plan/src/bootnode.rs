//! Bootnode discovery descriptor.
//!
//! The enode URL (discovery v4 node record) is a pure function of the static
//! key's public point, the bind address, and the discovery port; recomputing
//! it from the same inputs always yields the same URL.

use poaforge_crypto::{parse_private_key, public_from_private};
use poaforge_types::{PrivateKey, PublicKey};
use std::net::IpAddr;

use crate::error::PlanError;

/// A static bootstrap node: key material plus its derived discovery URL.
pub struct BootnodeDescriptor {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
    pub bind_address: IpAddr,
    pub discovery_port: u16,
    pub url: String,
}

impl BootnodeDescriptor {
    /// Derive a descriptor from a hex-encoded static key.
    ///
    /// Fails with a key error when the hex does not parse to a valid
    /// secp256k1 scalar, and with [`PlanError::InvalidAddress`] when the bind
    /// address is not an IPv4/IPv6 literal.
    pub fn derive(
        static_key_hex: &str,
        bind_address: &str,
        discovery_port: u16,
    ) -> Result<Self, PlanError> {
        let private_key = parse_private_key(static_key_hex)?;
        Self::from_key(private_key, bind_address, discovery_port)
    }

    /// Derive a descriptor from an already-validated private key.
    pub fn from_key(
        private_key: PrivateKey,
        bind_address: &str,
        discovery_port: u16,
    ) -> Result<Self, PlanError> {
        let address: IpAddr = bind_address
            .parse()
            .map_err(|_| PlanError::InvalidAddress(bind_address.to_string()))?;
        let public_key = public_from_private(&private_key)?;
        let url = enode_url(&public_key, address, discovery_port);
        Ok(Self {
            private_key,
            public_key,
            bind_address: address,
            discovery_port,
            url,
        })
    }
}

impl std::fmt::Debug for BootnodeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Deliberately omits the private key.
        f.debug_struct("BootnodeDescriptor")
            .field("bind_address", &self.bind_address)
            .field("discovery_port", &self.discovery_port)
            .field("url", &self.url)
            .finish()
    }
}

/// Format a discovery v4 enode URL. IPv6 addresses are bracketed.
fn enode_url(public_key: &PublicKey, address: IpAddr, port: u16) -> String {
    match address {
        IpAddr::V4(v4) => format!(
            "enode://{}@{}:{}?discport={}",
            public_key.to_hex(),
            v4,
            port,
            port
        ),
        IpAddr::V6(v6) => format!(
            "enode://{}@[{}]:{}?discport={}",
            public_key.to_hex(),
            v6,
            port,
            port
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn known_scalar_yields_generator_point_url() {
        let descriptor = BootnodeDescriptor::derive(KEY_ONE, "127.0.0.1", 30305).unwrap();
        assert_eq!(
            descriptor.url,
            "enode://79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8\
             @127.0.0.1:30305?discport=30305"
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let d1 = BootnodeDescriptor::derive(KEY_ONE, "127.0.0.1", 30305).unwrap();
        let d2 = BootnodeDescriptor::derive(KEY_ONE, "127.0.0.1", 30305).unwrap();
        assert_eq!(d1.url, d2.url);
        assert_eq!(d1.public_key, d2.public_key);
    }

    #[test]
    fn accepts_prefixed_hex() {
        let d = BootnodeDescriptor::derive(&format!("0x{KEY_ONE}"), "127.0.0.1", 30305).unwrap();
        assert!(d.url.starts_with("enode://79be667e"));
    }

    #[test]
    fn ipv6_address_is_bracketed() {
        let descriptor = BootnodeDescriptor::derive(KEY_ONE, "::1", 30311).unwrap();
        assert!(descriptor.url.contains("@[::1]:30311?discport=30311"));
    }

    #[test]
    fn url_embeds_128_hex_char_public_key() {
        let descriptor = BootnodeDescriptor::derive(KEY_ONE, "10.0.0.5", 30400).unwrap();
        let body = descriptor.url.strip_prefix("enode://").unwrap();
        let (pubkey, _) = body.split_once('@').unwrap();
        assert_eq!(pubkey.len(), 128);
        assert_eq!(pubkey, descriptor.public_key.to_hex());
    }

    #[test]
    fn invalid_key_rejected() {
        let result = BootnodeDescriptor::derive(&"00".repeat(32), "127.0.0.1", 30305);
        assert!(matches!(result, Err(PlanError::Key(_))));
    }

    #[test]
    fn invalid_bind_address_rejected() {
        let result = BootnodeDescriptor::derive(KEY_ONE, "localhost", 30305);
        assert!(matches!(result, Err(PlanError::InvalidAddress(_))));
    }
}
