//! BIP-32 hierarchical deterministic key derivation over secp256k1.
//!
//! Validator keys in mnemonic mode come from the conventional Ethereum path
//! `m/44'/60'/0'/0/{index}`: the first four components are fixed across the
//! whole network, only the final address-index component varies per validator.
//! Derivation is a pure function of (seed, path), so re-running generation with
//! the same mnemonic and node count reproduces the identical validator set.

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar, SecretKey};
use poaforge_types::PrivateKey;
use sha2::Sha512;
use std::fmt;

use crate::error::KeyError;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master-key derivation, fixed by BIP-32.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// High bit marking a hardened path component.
const HARDENED_BIT: u32 = 0x8000_0000;

/// BIP-44 purpose component.
const PURPOSE: u32 = 44;
/// BIP-44 coin type for Ethereum-style chains.
const COIN_TYPE: u32 = 60;

/// One component of a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildIndex(u32);

impl ChildIndex {
    /// A hardened component (`i'` notation). `index` must be below 2^31.
    pub fn hardened(index: u32) -> Self {
        debug_assert!(index < HARDENED_BIT);
        Self(index | HARDENED_BIT)
    }

    /// A non-hardened component.
    pub fn normal(index: u32) -> Self {
        debug_assert!(index < HARDENED_BIT);
        Self(index)
    }

    pub fn is_hardened(&self) -> bool {
        self.0 & HARDENED_BIT != 0
    }

    /// The raw u32 including the hardened bit, as serialized into HMAC input.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.0 & !HARDENED_BIT)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// An ordered sequence of child indices below the master key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    pub fn new(components: Vec<ChildIndex>) -> Self {
        Self(components)
    }

    /// The validator path `m/44'/60'/0'/0/{index}`.
    pub fn validator(index: u32) -> Self {
        Self(vec![
            ChildIndex::hardened(PURPOSE),
            ChildIndex::hardened(COIN_TYPE),
            ChildIndex::hardened(0),
            ChildIndex::normal(0),
            ChildIndex::normal(index),
        ])
    }

    pub fn components(&self) -> &[ChildIndex] {
        &self.0
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.0 {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

/// An extended key: secret scalar plus chain code.
struct ExtendedKey {
    secret: SecretKey,
    chain_code: [u8; 32],
}

/// Derive the BIP-32 master key from a BIP-39 seed.
fn master_from_seed(seed: &[u8]) -> Result<ExtendedKey, KeyError> {
    let mut mac = HmacSha512::new_from_slice(MASTER_HMAC_KEY)
        .map_err(|e| KeyError::InvalidKey(e.to_string()))?;
    mac.update(seed);
    let output = mac.finalize().into_bytes();

    let secret = SecretKey::from_slice(&output[..32])
        .map_err(|_| KeyError::InvalidKey("master key outside the valid scalar range".into()))?;
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&output[32..]);
    Ok(ExtendedKey { secret, chain_code })
}

/// Derive one child extended key per BIP-32 CKDpriv.
///
/// Fails with [`KeyError::InvalidChildIndex`] when the HMAC output is not a
/// usable tweak (IL >= curve order, or the child scalar lands on zero). The
/// probability is negligible but the failure must surface: substituting an
/// adjacent index would break derivation determinism.
fn derive_child(parent: &ExtendedKey, index: ChildIndex) -> Result<ExtendedKey, KeyError> {
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    let mut mac = HmacSha512::new_from_slice(&parent.chain_code)
        .map_err(|e| KeyError::InvalidKey(e.to_string()))?;
    if index.is_hardened() {
        mac.update(&[0x00]);
        mac.update(&parent.secret.to_bytes());
    } else {
        let compressed = parent.secret.public_key().to_encoded_point(true);
        mac.update(compressed.as_bytes());
    }
    mac.update(&index.raw().to_be_bytes());
    let output = mac.finalize().into_bytes();

    let mut il = [0u8; 32];
    il.copy_from_slice(&output[..32]);
    let tweak = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(il)))
        .ok_or(KeyError::InvalidChildIndex { index: index.raw() })?;

    let parent_scalar: Scalar = *parent.secret.to_nonzero_scalar().as_ref();
    let child_scalar = tweak + parent_scalar;
    if bool::from(child_scalar.is_zero()) {
        return Err(KeyError::InvalidChildIndex { index: index.raw() });
    }

    let secret = SecretKey::from_slice(&child_scalar.to_repr())
        .map_err(|_| KeyError::InvalidKey("child key outside the valid scalar range".into()))?;
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&output[32..]);
    Ok(ExtendedKey { secret, chain_code })
}

/// Walk a derivation path from a BIP-39 seed, one component at a time.
pub fn derive_from_seed(seed: &[u8], path: &DerivationPath) -> Result<PrivateKey, KeyError> {
    let mut key = master_from_seed(seed)?;
    for &component in path.components() {
        key = derive_child(&key, component)?;
    }
    Ok(PrivateKey(key.secret.to_bytes().into()))
}

/// Derive the private key for validator `index` from a mnemonic phrase.
///
/// Uses the BIP-39 seed with an empty passphrase and the path
/// `m/44'/60'/0'/0/{index}`.
pub fn derive_validator_key(mnemonic: &str, index: u32) -> Result<PrivateKey, KeyError> {
    let mnemonic = Mnemonic::parse_normalized(mnemonic)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))?;
    let seed = mnemonic.to_seed_normalized("");
    derive_from_seed(&seed, &DerivationPath::validator(index))
}

/// Validate that a phrase is a well-formed BIP-39 mnemonic.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_normalized(phrase).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::derive_address;
    use crate::keys::public_from_private;

    /// Widely published development mnemonic with known derived accounts.
    const TEST_MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    #[test]
    fn path_display() {
        let path = DerivationPath::validator(7);
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/7");
    }

    #[test]
    fn hardened_bit_in_raw_index() {
        assert_eq!(ChildIndex::hardened(44).raw(), 0x8000_002c);
        assert_eq!(ChildIndex::normal(5).raw(), 5);
    }

    #[test]
    fn derivation_is_deterministic() {
        let k1 = derive_validator_key(TEST_MNEMONIC, 3).unwrap();
        let k2 = derive_validator_key(TEST_MNEMONIC, 3).unwrap();
        assert_eq!(k1.0, k2.0);
    }

    #[test]
    fn known_vector_index_0() {
        let key = derive_validator_key(TEST_MNEMONIC, 0).unwrap();
        assert_eq!(
            key.to_hex(),
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
        );
        let address = derive_address(&public_from_private(&key).unwrap());
        assert_eq!(
            address.to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn known_vector_index_1() {
        let key = derive_validator_key(TEST_MNEMONIC, 1).unwrap();
        assert_eq!(
            key.to_hex(),
            "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
        );
        let address = derive_address(&public_from_private(&key).unwrap());
        assert_eq!(
            address.to_string(),
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
        );
    }

    #[test]
    fn distinct_indices_yield_distinct_addresses() {
        let mut addresses = Vec::new();
        for index in 0..8 {
            let key = derive_validator_key(TEST_MNEMONIC, index).unwrap();
            addresses.push(derive_address(&public_from_private(&key).unwrap()));
        }
        for i in 0..addresses.len() {
            for j in (i + 1)..addresses.len() {
                assert_ne!(addresses[i], addresses[j]);
            }
        }
    }

    #[test]
    fn invalid_mnemonic_rejected() {
        let result = derive_validator_key("not a valid mnemonic phrase", 0);
        assert!(matches!(result, Err(KeyError::InvalidMnemonic(_))));
        assert!(!validate_mnemonic(""));
    }

    #[test]
    fn seed_walk_matches_full_derivation() {
        let mnemonic = Mnemonic::parse_normalized(TEST_MNEMONIC).unwrap();
        let seed = mnemonic.to_seed_normalized("");
        let via_seed = derive_from_seed(&seed, &DerivationPath::validator(2)).unwrap();
        let via_phrase = derive_validator_key(TEST_MNEMONIC, 2).unwrap();
        assert_eq!(via_seed.0, via_phrase.0);
    }
}
