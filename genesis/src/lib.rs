//! Clique genesis construction for poaforge.
//!
//! The genesis document is the one artifact every node must load byte-identically
//! to join the same network: serialize it once and fan the bytes out. This crate
//! covers the fixed-layout `extraData` signer encoding and the geth-compatible
//! JSON document model.

pub mod document;
pub mod error;
pub mod extra_data;

pub use document::{
    ChainConfig, CliqueConfig, GenesisAccount, GenesisDocument, GenesisParams, DEFAULT_GAS_LIMIT,
};
pub use error::GenesisError;
pub use extra_data::ExtraData;
