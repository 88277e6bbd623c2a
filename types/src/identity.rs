//! Validator identity produced by network generation.

use crate::{Address, PrivateKey};

/// One validator slot in a generated network.
///
/// Indices are contiguous starting at 0 and fix both the HD derivation path
/// (in mnemonic mode) and the validator's position in the `extraData` signer
/// list. Created once per generation run and never mutated. Not `Clone`:
/// the private key has exactly one owner until it is handed to the
/// credential-persistence layer.
pub struct ValidatorIdentity {
    /// Ordinal position, 0-based.
    pub index: u32,
    /// Address derived from the private key's public point.
    pub address: Address,
    /// The secp256k1 secret scalar.
    pub private_key: PrivateKey,
}

impl std::fmt::Debug for ValidatorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Deliberately omits the private key.
        f.debug_struct("ValidatorIdentity")
            .field("index", &self.index)
            .field("address", &self.address)
            .finish()
    }
}
