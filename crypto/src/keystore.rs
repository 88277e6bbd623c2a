//! Argon2id encrypted keystore for validator private keys.
//!
//! Encrypts a 32-byte secp256k1 secret key with the network credential password:
//! 1. Argon2id derives a 32-byte encryption key from the password + random salt
//! 2. AES-256-GCM encrypts the secret key with a random nonce
//! 3. The result is stored as a JSON file with all parameters for future decryption

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use poaforge_types::{Address, PrivateKey};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::KeyError;

/// Argon2id parameters: 64 MB memory, 3 iterations, 1 lane of parallelism.
const ARGON2_MEMORY_KIB: u32 = 65536; // 64 MB
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

/// Salt length in bytes.
const SALT_LEN: usize = 32;
/// AES-GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;

/// The top-level keystore file structure, serializable to/from JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreFile {
    pub version: u32,
    /// The account address, so operators can match key files to validators
    /// without decrypting.
    pub address: Address,
    pub crypto: KeystoreCrypto,
}

/// The crypto section of the keystore, containing all encryption parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    pub cipher: String,
    pub kdf: String,
    pub kdf_params: KdfParams,
    /// Hex-encoded salt.
    pub salt: String,
    /// Hex-encoded nonce.
    pub nonce: String,
    /// Hex-encoded ciphertext.
    pub ciphertext: String,
}

/// KDF parameters for Argon2id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KdfParams {
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Encrypt a validator private key with a password using Argon2id + AES-256-GCM.
pub fn encrypt_keystore(
    private_key: &PrivateKey,
    address: Address,
    password: &str,
) -> Result<KeystoreFile, KeyError> {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let derived_key = derive_key(password, &salt)?;

    let cipher = Aes256Gcm::new_from_slice(&derived_key)
        .map_err(|e| KeyError::Keystore(format!("AES key init failed: {}", e)))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, private_key.as_bytes().as_ref())
        .map_err(|e| KeyError::Keystore(format!("encryption failed: {}", e)))?;

    Ok(KeystoreFile {
        version: 1,
        address,
        crypto: KeystoreCrypto {
            cipher: "aes-256-gcm".to_string(),
            kdf: "argon2id".to_string(),
            kdf_params: KdfParams {
                memory: ARGON2_MEMORY_KIB,
                iterations: ARGON2_ITERATIONS,
                parallelism: ARGON2_PARALLELISM,
            },
            salt: hex::encode(salt),
            nonce: hex::encode(nonce_bytes),
            ciphertext: hex::encode(&ciphertext),
        },
    })
}

/// Decrypt a keystore file with the given password, returning the private key.
pub fn decrypt_keystore(keystore: &KeystoreFile, password: &str) -> Result<PrivateKey, KeyError> {
    if keystore.version != 1 {
        return Err(KeyError::Keystore(format!(
            "unsupported keystore version: {}",
            keystore.version
        )));
    }

    let salt = hex::decode(&keystore.crypto.salt)
        .map_err(|e| KeyError::Keystore(format!("invalid salt hex: {}", e)))?;
    let nonce_bytes = hex::decode(&keystore.crypto.nonce)
        .map_err(|e| KeyError::Keystore(format!("invalid nonce hex: {}", e)))?;
    let ciphertext = hex::decode(&keystore.crypto.ciphertext)
        .map_err(|e| KeyError::Keystore(format!("invalid ciphertext hex: {}", e)))?;

    if nonce_bytes.len() != NONCE_LEN {
        return Err(KeyError::Keystore(format!(
            "invalid nonce length: expected {}, got {}",
            NONCE_LEN,
            nonce_bytes.len()
        )));
    }

    let derived_key = derive_key(password, &salt)?;

    let cipher = Aes256Gcm::new_from_slice(&derived_key)
        .map_err(|e| KeyError::Keystore(format!("AES key init failed: {}", e)))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let plaintext = cipher.decrypt(nonce, ciphertext.as_ref()).map_err(|_| {
        KeyError::Keystore("decryption failed: wrong password or corrupted data".to_string())
    })?;

    let key: [u8; 32] = plaintext.as_slice().try_into().map_err(|_| {
        KeyError::Keystore(format!(
            "decrypted key has wrong length: expected 32, got {}",
            plaintext.len()
        ))
    })?;
    Ok(PrivateKey(key))
}

/// Save a keystore to a JSON file.
pub fn save_keystore(keystore: &KeystoreFile, path: &Path) -> Result<(), KeyError> {
    let json = serde_json::to_string_pretty(keystore)
        .map_err(|e| KeyError::Keystore(format!("JSON serialization failed: {}", e)))?;
    std::fs::write(path, json)
        .map_err(|e| KeyError::Keystore(format!("failed to write keystore file: {}", e)))?;
    Ok(())
}

/// Load a keystore from a JSON file.
pub fn load_keystore(path: &Path) -> Result<KeystoreFile, KeyError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| KeyError::Keystore(format!("failed to read keystore file: {}", e)))?;
    let keystore: KeystoreFile = serde_json::from_str(&json)
        .map_err(|e| KeyError::Keystore(format!("invalid keystore JSON: {}", e)))?;
    Ok(keystore)
}

/// Derive a 32-byte key from a password and salt using Argon2id.
fn derive_key(password: &str, salt: &[u8]) -> Result<[u8; 32], KeyError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(ARGON2_OUTPUT_LEN),
    )
    .map_err(|e| KeyError::Keystore(format!("Argon2 params error: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut output)
        .map_err(|e| KeyError::Keystore(format!("Argon2 hashing failed: {}", e)))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> Address {
        Address::new([0x42; 20])
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = PrivateKey([42u8; 32]);
        let password = "test-password-123";

        let keystore = encrypt_keystore(&key, test_address(), password).unwrap();
        let decrypted = decrypt_keystore(&keystore, password).unwrap();

        assert_eq!(decrypted.0, key.0);
    }

    #[test]
    fn wrong_password_fails() {
        let key = PrivateKey([42u8; 32]);
        let keystore = encrypt_keystore(&key, test_address(), "correct-password").unwrap();
        let result = decrypt_keystore(&keystore, "wrong-password");
        assert!(result.is_err());
    }

    #[test]
    fn keystore_records_address_and_parameters() {
        let keystore = encrypt_keystore(&PrivateKey([0u8; 32]), test_address(), "pass").unwrap();
        assert_eq!(keystore.version, 1);
        assert_eq!(keystore.address, test_address());
        assert_eq!(keystore.crypto.cipher, "aes-256-gcm");
        assert_eq!(keystore.crypto.kdf, "argon2id");
        assert_eq!(keystore.crypto.kdf_params.memory, 65536);
        assert_eq!(keystore.crypto.kdf_params.iterations, 3);
        assert_eq!(keystore.crypto.kdf_params.parallelism, 1);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let key = PrivateKey([99u8; 32]);
        let password = "file-test";
        let keystore = encrypt_keystore(&key, test_address(), password).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");

        save_keystore(&keystore, &path).unwrap();
        let loaded = load_keystore(&path).unwrap();
        let decrypted = decrypt_keystore(&loaded, password).unwrap();

        assert_eq!(decrypted.0, key.0);
        assert_eq!(loaded.address, test_address());
    }

    #[test]
    fn different_passwords_produce_different_ciphertext() {
        let key = PrivateKey([7u8; 32]);
        let ks1 = encrypt_keystore(&key, test_address(), "password1").unwrap();
        let ks2 = encrypt_keystore(&key, test_address(), "password2").unwrap();
        // Different salts ensure different ciphertexts even with the same key.
        assert_ne!(ks1.crypto.ciphertext, ks2.crypto.ciphertext);
    }

    #[test]
    fn load_nonexistent_file_fails() {
        let result = load_keystore(Path::new("/tmp/nonexistent-poaforge-keystore.json"));
        assert!(result.is_err());
    }

    #[test]
    fn unsupported_version_rejected() {
        let mut keystore =
            encrypt_keystore(&PrivateKey([0u8; 32]), test_address(), "pass").unwrap();
        keystore.version = 99;
        let result = decrypt_keystore(&keystore, "pass");
        assert!(result.is_err());
    }
}
