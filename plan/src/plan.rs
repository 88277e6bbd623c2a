//! The network plan state machine.
//!
//! `Configured → IdentitiesGenerated → GenesisAssembled → PortsAllocated →
//! Finalized`. Transitions are strictly sequential and non-reentrant: each
//! variant owns the artifacts produced so far, and a transition is an atomic
//! move from one variant to the next. Re-running a completed step fails with
//! [`PlanError::AlreadyGenerated`] instead of silently regenerating, since a
//! re-derived genesis would desynchronize from already-persisted credentials.
//!
//! The plan is not designed for concurrent access; a caller driving it from
//! multiple threads must serialize the whole sequence.

use poaforge_crypto::{derive_validator_key, generate_private_key, public_from_private};
use poaforge_genesis::{ExtraData, GenesisDocument};
use poaforge_types::{Address, ValidatorIdentity};
use std::collections::HashSet;
use std::mem;
use tracing::debug;

use crate::bootnode::BootnodeDescriptor;
use crate::config::NetworkConfig;
use crate::error::PlanError;
use crate::ports::{allocate_ports, PortAssignment};

/// Where validator private keys come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySource {
    /// Independent draws from the secure random source.
    Random,
    /// BIP-32 derivation from a mnemonic; index `i` uses path
    /// `m/44'/60'/0'/0/i`.
    Mnemonic(String),
}

/// The complete artifact set of a finalized plan.
pub struct NetworkArtifacts {
    pub identities: Vec<ValidatorIdentity>,
    pub genesis: GenesisDocument,
    pub port_assignments: Vec<PortAssignment>,
    pub bootnode: BootnodeDescriptor,
}

enum PlanState {
    Configured,
    IdentitiesGenerated {
        identities: Vec<ValidatorIdentity>,
    },
    GenesisAssembled {
        identities: Vec<ValidatorIdentity>,
        genesis: GenesisDocument,
    },
    PortsAllocated {
        identities: Vec<ValidatorIdentity>,
        genesis: GenesisDocument,
        port_assignments: Vec<PortAssignment>,
    },
    Finalized(NetworkArtifacts),
}

impl PlanState {
    fn name(&self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::IdentitiesGenerated { .. } => "identities generated",
            Self::GenesisAssembled { .. } => "genesis assembled",
            Self::PortsAllocated { .. } => "ports allocated",
            Self::Finalized(_) => "finalized",
        }
    }
}

/// Orchestrates one network generation run.
pub struct NetworkPlan {
    config: NetworkConfig,
    key_source: KeySource,
    state: PlanState,
}

impl NetworkPlan {
    /// Create a plan from a validated configuration.
    ///
    /// Validation runs here so that malformed inputs fail before any artifact
    /// is generated.
    pub fn new(config: NetworkConfig) -> Result<Self, PlanError> {
        config.validate()?;
        let key_source = match &config.mnemonic {
            Some(phrase) => KeySource::Mnemonic(phrase.clone()),
            None => KeySource::Random,
        };
        Ok(Self {
            config,
            key_source,
            state: PlanState::Configured,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn key_source(&self) -> &KeySource {
        &self.key_source
    }

    /// Generate one validator identity per node, indices contiguous from 0.
    ///
    /// A single pass over `0..n`; any derivation failure aborts the whole step
    /// and leaves the plan in `Configured`. Derived identities whose addresses
    /// collide fail with [`PlanError::DuplicateAddress`] rather than silently
    /// folding two validators into one genesis allocation.
    pub fn generate_identities(&mut self) -> Result<(), PlanError> {
        match self.state {
            PlanState::Configured => {}
            _ => return Err(PlanError::AlreadyGenerated("identity generation")),
        }

        let node_count = self.config.resolved_node_names().len();
        let identities = (0..node_count as u32)
            .map(|index| {
                let private_key = match &self.key_source {
                    KeySource::Random => generate_private_key()?,
                    KeySource::Mnemonic(phrase) => derive_validator_key(phrase, index)?,
                };
                let public_key = public_from_private(&private_key)?;
                let address = poaforge_crypto::derive_address(&public_key);
                Ok(ValidatorIdentity {
                    index,
                    address,
                    private_key,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        let mut seen: HashSet<Address> = HashSet::new();
        for identity in &identities {
            if !seen.insert(identity.address) {
                return Err(PlanError::DuplicateAddress(identity.address));
            }
        }

        debug!(count = identities.len(), "generated validator identities");
        self.state = PlanState::IdentitiesGenerated { identities };
        Ok(())
    }

    /// Encode the validator set into `extraData` and assemble the genesis
    /// document.
    pub fn assemble_genesis(&mut self) -> Result<(), PlanError> {
        match self.state {
            PlanState::Configured => {
                return Err(PlanError::OutOfOrder {
                    step: "genesis assembly",
                    expected: "identity generation",
                })
            }
            PlanState::IdentitiesGenerated { .. } => {}
            _ => return Err(PlanError::AlreadyGenerated("genesis assembly")),
        }
        let params = self.config.genesis_params()?;

        let state = mem::replace(&mut self.state, PlanState::Configured);
        let PlanState::IdentitiesGenerated { identities } = state else {
            // Unreachable given the check above; restore and report.
            let name = state.name();
            self.state = state;
            return Err(PlanError::Config(format!("unexpected plan state: {name}")));
        };

        let addresses: Vec<Address> = identities.iter().map(|v| v.address).collect();
        let extra_data = ExtraData::encode(&addresses);
        let genesis = GenesisDocument::build(&params, &addresses, extra_data);
        debug!(
            validators = addresses.len(),
            chain_id = params.chain_id,
            "assembled genesis document"
        );
        self.state = PlanState::GenesisAssembled {
            identities,
            genesis,
        };
        Ok(())
    }

    /// Assign each node its disjoint (p2p, http, authrpc) port triple.
    pub fn allocate_ports(&mut self) -> Result<(), PlanError> {
        match self.state {
            PlanState::Configured | PlanState::IdentitiesGenerated { .. } => {
                return Err(PlanError::OutOfOrder {
                    step: "port allocation",
                    expected: "genesis assembly",
                })
            }
            PlanState::GenesisAssembled { .. } => {}
            _ => return Err(PlanError::AlreadyGenerated("port allocation")),
        }

        let node_count = self.config.resolved_node_names().len();
        let port_assignments = allocate_ports(node_count, &self.config.base_ports())?;

        let state = mem::replace(&mut self.state, PlanState::Configured);
        let PlanState::GenesisAssembled {
            identities,
            genesis,
        } = state
        else {
            let name = state.name();
            self.state = state;
            return Err(PlanError::Config(format!("unexpected plan state: {name}")));
        };
        self.state = PlanState::PortsAllocated {
            identities,
            genesis,
            port_assignments,
        };
        Ok(())
    }

    /// Derive the bootnode descriptor and seal the plan.
    ///
    /// `Finalized` is terminal; afterwards the plan is read-only through
    /// [`NetworkPlan::artifacts`].
    pub fn finalize(&mut self) -> Result<(), PlanError> {
        match self.state {
            PlanState::PortsAllocated { .. } => {}
            PlanState::Finalized(_) => return Err(PlanError::AlreadyGenerated("finalization")),
            _ => {
                return Err(PlanError::OutOfOrder {
                    step: "finalization",
                    expected: "port allocation",
                })
            }
        }

        let bootnode = match &self.config.bootnode_key {
            Some(key_hex) => BootnodeDescriptor::derive(
                key_hex,
                &self.config.bootnode_address,
                self.config.discovery_port,
            )?,
            None => BootnodeDescriptor::from_key(
                generate_private_key()?,
                &self.config.bootnode_address,
                self.config.discovery_port,
            )?,
        };

        let state = mem::replace(&mut self.state, PlanState::Configured);
        let PlanState::PortsAllocated {
            identities,
            genesis,
            port_assignments,
        } = state
        else {
            let name = state.name();
            self.state = state;
            return Err(PlanError::Config(format!("unexpected plan state: {name}")));
        };
        debug!(url = %bootnode.url, "derived bootnode descriptor");
        self.state = PlanState::Finalized(NetworkArtifacts {
            identities,
            genesis,
            port_assignments,
            bootnode,
        });
        Ok(())
    }

    /// The full artifact set; only available once finalized.
    pub fn artifacts(&self) -> Result<&NetworkArtifacts, PlanError> {
        match &self.state {
            PlanState::Finalized(artifacts) => Ok(artifacts),
            _ => Err(PlanError::OutOfOrder {
                step: "artifact access",
                expected: "finalization",
            }),
        }
    }

    /// Consume the plan, yielding the artifact set.
    pub fn into_artifacts(self) -> Result<NetworkArtifacts, PlanError> {
        match self.state {
            PlanState::Finalized(artifacts) => Ok(artifacts),
            _ => Err(PlanError::OutOfOrder {
                step: "artifact access",
                expected: "finalization",
            }),
        }
    }

    /// Drive all four transitions in order.
    pub fn run(config: NetworkConfig) -> Result<NetworkArtifacts, PlanError> {
        let mut plan = Self::new(config)?;
        plan.generate_identities()?;
        plan.assemble_genesis()?;
        plan.allocate_ports()?;
        plan.finalize()?;
        plan.into_artifacts()
    }
}
