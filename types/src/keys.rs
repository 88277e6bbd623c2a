//! Cryptographic key types for validator and bootnode identities.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 64-byte uncompressed secp256k1 public key (x || y, without the SEC1 tag byte).
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(pub [u8; 64]);

/// A 32-byte secp256k1 private key (secret scalar).
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Hex encoding without prefix, as embedded in enode URLs (128 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey(0x{})", self.to_hex())
    }
}

impl PrivateKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex encoding without prefix (64 characters), as written to key files.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_hex_is_64_chars() {
        let key = PrivateKey([0xab; 32]);
        let hex = key.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
    }

    #[test]
    fn public_key_hex_is_128_chars() {
        let key = PublicKey([0x01; 64]);
        assert_eq!(key.to_hex().len(), 128);
    }
}
