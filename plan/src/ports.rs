//! Per-node port allocation.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Base ports from which per-node triples are allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePorts {
    pub p2p: u16,
    pub http: u16,
    pub auth_rpc: u16,
}

/// The port triple assigned to one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortAssignment {
    pub node_index: u32,
    pub p2p_port: u16,
    pub http_port: u16,
    pub auth_rpc_port: u16,
}

/// Allocate `base + i` in each category for node `i` in `0..node_count`.
///
/// Categories are allocated independently; no cross-category collision
/// detection is performed, so callers must choose non-overlapping base ranges.
/// Fails with [`PlanError::InvalidRange`] when `node_count` is zero or any
/// category would run past the u16 port space.
pub fn allocate_ports(node_count: usize, base: &BasePorts) -> Result<Vec<PortAssignment>, PlanError> {
    if node_count == 0 {
        return Err(PlanError::InvalidRange(
            "node count must be at least 1".into(),
        ));
    }

    (0..node_count)
        .map(|i| {
            let offset = u16::try_from(i).map_err(|_| {
                PlanError::InvalidRange(format!("node count {} exceeds the port space", node_count))
            })?;
            let assign = |base_port: u16, category: &str| {
                base_port.checked_add(offset).ok_or_else(|| {
                    PlanError::InvalidRange(format!(
                        "{} port {} + {} exceeds 65535",
                        category, base_port, offset
                    ))
                })
            };
            Ok(PortAssignment {
                node_index: offset as u32,
                p2p_port: assign(base.p2p, "p2p")?,
                http_port: assign(base.http, "http")?,
                auth_rpc_port: assign(base.auth_rpc, "authrpc")?,
            })
        })
        .collect()
}
