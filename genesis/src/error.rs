//! Error type for genesis construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("malformed extraData: {0}")]
    MalformedExtraData(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
