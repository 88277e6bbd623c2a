//! secp256k1 key generation and public-key recovery.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use poaforge_types::{PrivateKey, PublicKey};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::KeyError;

/// Generate a new secp256k1 private key from a secure random source.
///
/// Rejection-samples 32-byte draws until one lands in the valid scalar range
/// (non-zero, below the curve order). A failing random source surfaces as
/// [`KeyError::Entropy`] and aborts generation; a validator set with mixed
/// entropy quality must not be used.
pub fn generate_private_key() -> Result<PrivateKey, KeyError> {
    let mut candidate = [0u8; 32];
    loop {
        OsRng
            .try_fill_bytes(&mut candidate)
            .map_err(|e| KeyError::Entropy(e.to_string()))?;
        if let Ok(secret) = SecretKey::from_slice(&candidate) {
            return Ok(PrivateKey(secret.to_bytes().into()));
        }
        // Out-of-range draw (probability < 2^-127): redraw.
    }
}

/// Parse a hex-encoded secp256k1 secret scalar.
///
/// Accepts an optional `0x` prefix. The scalar must be exactly 32 bytes,
/// non-zero, and below the curve order.
pub fn parse_private_key(hex_str: &str) -> Result<PrivateKey, KeyError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(stripped).map_err(|e| KeyError::InvalidKey(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(KeyError::InvalidKey(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    let secret = SecretKey::from_slice(&bytes)
        .map_err(|_| KeyError::InvalidKey("scalar is zero or exceeds the curve order".into()))?;
    Ok(PrivateKey(secret.to_bytes().into()))
}

/// Derive the uncompressed public key (64 bytes, without the SEC1 tag) from a
/// private key.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, KeyError> {
    let secret = SecretKey::from_slice(&private.0)
        .map_err(|_| KeyError::InvalidKey("scalar is zero or exceeds the curve order".into()))?;
    let point = secret.public_key().to_encoded_point(false);
    let mut output = [0u8; 64];
    output.copy_from_slice(&point.as_bytes()[1..]);
    Ok(PublicKey(output))
}
