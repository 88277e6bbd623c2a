//! Network plan orchestration for poaforge.
//!
//! Composes key derivation, genesis assembly, port allocation, and bootnode
//! descriptor derivation into one artifact set, behind a strictly sequential
//! state machine. All operations are synchronous and in-memory; the external
//! orchestrator (the CLI) performs filesystem I/O afterwards.

pub mod bootnode;
pub mod config;
pub mod error;
pub mod plan;
pub mod ports;

pub use bootnode::BootnodeDescriptor;
pub use config::NetworkConfig;
pub use error::PlanError;
pub use plan::{KeySource, NetworkArtifacts, NetworkPlan};
pub use ports::{allocate_ports, BasePorts, PortAssignment};
