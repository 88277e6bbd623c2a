//! Cryptographic primitives for poaforge.
//!
//! - **secp256k1** key generation, both random and BIP-32 hierarchical deterministic
//! - **Keccak-256** hashing and account address derivation (hash-and-truncate)
//! - **BIP-39** mnemonic handling for reproducible validator sets
//! - Argon2id + AES-256-GCM encrypted keystore for credential files

pub mod address;
pub mod error;
pub mod hash;
pub mod hd;
pub mod keys;
pub mod keystore;

pub use address::{derive_address, to_checksummed};
pub use error::KeyError;
pub use hash::keccak256;
pub use hd::{derive_from_seed, derive_validator_key, validate_mnemonic, ChildIndex, DerivationPath};
pub use keys::{generate_private_key, parse_private_key, public_from_private};
pub use keystore::{decrypt_keystore, encrypt_keystore, load_keystore, save_keystore, KeystoreFile};
