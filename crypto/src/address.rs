//! Account address derivation from public keys.
//!
//! An address is the last 20 bytes of the Keccak-256 hash of the 64-byte
//! uncompressed public key (SEC1 tag byte excluded). Operator-facing output
//! uses the EIP-55 mixed-case checksum encoding.

use poaforge_types::{Address, PublicKey};

use crate::hash::keccak256;

/// Derive the 20-byte account address for a public key.
///
/// Pure hash-and-truncate; no failure modes for well-formed keys.
pub fn derive_address(public: &PublicKey) -> Address {
    let hash = keccak256(public.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

/// Render an address with the EIP-55 mixed-case checksum.
///
/// A hex letter is uppercased when the corresponding nibble of
/// `keccak256(lowercase_hex(address))` is 8 or above.
pub fn to_checksummed(address: &Address) -> String {
    let hex_addr = hex::encode(address.as_bytes());
    let hash = keccak256(hex_addr.as_bytes());

    let mut output = String::with_capacity(42);
    output.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            output.push(c.to_ascii_uppercase());
        } else {
            output.push(c);
        }
    }
    output
}
