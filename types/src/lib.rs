//! Fundamental types for the poaforge network generator.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, keys, validator identities, and wei-denominated amounts.

pub mod address;
pub mod amount;
pub mod identity;
pub mod keys;

pub use address::{Address, AddressParseError};
pub use amount::{WeiAmount, WeiParseError};
pub use identity::ValidatorIdentity;
pub use keys::{PrivateKey, PublicKey};
