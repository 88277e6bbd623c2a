//! Error type for key generation and derivation.

use thiserror::Error;

/// Errors arising from key generation, derivation, and the keystore.
///
/// None of these are transient: every variant is either a configuration
/// defect or an unusable derivation result, so callers propagate and abort
/// rather than retry. Retrying HD derivation with an adjusted index would
/// silently break seed determinism.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("secure random source failed: {0}")]
    Entropy(String),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("child derivation failed at path component {index}")]
    InvalidChildIndex { index: u32 },

    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("keystore error: {0}")]
    Keystore(String),
}
