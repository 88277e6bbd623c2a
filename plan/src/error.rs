//! Error type for network planning.

use poaforge_types::Address;
use thiserror::Error;

/// Errors arising from configuration validation and plan execution.
///
/// Every variant is fatal for the run: planning has no transient failures, so
/// nothing is retried. Malformed configuration surfaces before any artifact is
/// generated; state-machine misuse indicates a caller bug.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("key error: {0}")]
    Key(#[from] poaforge_crypto::KeyError),

    #[error("genesis error: {0}")]
    Genesis(#[from] poaforge_genesis::GenesisError),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("step already completed: {0}")]
    AlreadyGenerated(&'static str),

    #[error("{step} requires {expected} first")]
    OutOfOrder {
        step: &'static str,
        expected: &'static str,
    },

    #[error("duplicate validator address {0}")]
    DuplicateAddress(Address),
}
