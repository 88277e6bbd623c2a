//! Filesystem layout for generated network artifacts.
//!
//! ```text
//! <out>/
//!   genesis.json            reference copy of the genesis document
//!   bootnode.key            bootnode static key (hex)
//!   startBootnode.sh        bootnode launch script
//!   init.sh                 runs `geth init` once per node
//!   info.txt                operator summary (addresses, keys, password)
//!   <node>/
//!     password.txt
//!     genesis.json          byte-identical copy for this node
//!     keystore/key.json     Argon2id + AES-256-GCM encrypted private key
//!     keystore/privatekey.txt
//!   <node>.sh               launch script for this node
//! ```
//!
//! The genesis document is serialized exactly once and the same bytes are
//! written into every node directory.

use poaforge_crypto::{encrypt_keystore, to_checksummed, KeyError};
use poaforge_genesis::GenesisError;
use poaforge_plan::{NetworkArtifacts, NetworkConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::scripts;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("key error: {0}")]
    Key(#[from] KeyError),

    #[error("genesis error: {0}")]
    Genesis(#[from] GenesisError),

    #[error("output already exists: {0} (pass --force to overwrite)")]
    OutputExists(PathBuf),
}

/// Write the complete artifact set under `out_dir`.
///
/// Refuses to touch existing node directories unless `force` is set, so a
/// re-run cannot silently desynchronize persisted credentials from a fresh
/// genesis.
pub fn write_network(
    out_dir: &Path,
    config: &NetworkConfig,
    artifacts: &NetworkArtifacts,
    force: bool,
) -> Result<(), ArtifactError> {
    let node_names = config.resolved_node_names();

    if !force {
        for name in &node_names {
            let dir = out_dir.join(name);
            if dir.exists() {
                return Err(ArtifactError::OutputExists(dir));
            }
        }
    }
    fs::create_dir_all(out_dir)?;

    // One serialization, fanned out byte-identically.
    let genesis_json = artifacts.genesis.to_json()?;
    fs::write(out_dir.join("genesis.json"), &genesis_json)?;

    let mut info = String::new();

    for ((name, identity), ports) in node_names
        .iter()
        .zip(&artifacts.identities)
        .zip(&artifacts.port_assignments)
    {
        let node_dir = out_dir.join(name);
        let keystore_dir = node_dir.join("keystore");
        fs::create_dir_all(&keystore_dir)?;

        fs::write(node_dir.join("password.txt"), &config.password)?;
        fs::write(node_dir.join("genesis.json"), &genesis_json)?;

        let keystore =
            encrypt_keystore(&identity.private_key, identity.address, &config.password)?;
        poaforge_crypto::save_keystore(&keystore, &keystore_dir.join("key.json"))?;
        fs::write(
            keystore_dir.join("privatekey.txt"),
            identity.private_key.to_hex(),
        )?;

        let address = to_checksummed(&identity.address);
        let script = scripts::launch_script(
            name,
            &address,
            ports,
            config.chain_id,
            &artifacts.bootnode.url,
        );
        let script_path = out_dir.join(format!("{name}.sh"));
        fs::write(&script_path, script)?;
        make_executable(&script_path)?;

        info.push_str(&format!(
            "Node: {}\nAddress: {}\nPrivateKey: {}\nPassword: {}\n\n",
            name,
            address,
            identity.private_key.to_hex(),
            config.password
        ));

        info!(node = %name, address = %address, "wrote node artifacts");
    }

    fs::write(
        out_dir.join("bootnode.key"),
        artifacts.bootnode.private_key.to_hex(),
    )?;
    let bootnode_script = scripts::bootnode_script(
        &config.bootnode_address,
        artifacts.bootnode.discovery_port,
    );
    let bootnode_path = out_dir.join("startBootnode.sh");
    fs::write(&bootnode_path, bootnode_script)?;
    make_executable(&bootnode_path)?;

    let init_path = out_dir.join("init.sh");
    fs::write(&init_path, scripts::init_script(&node_names))?;
    make_executable(&init_path)?;

    fs::write(out_dir.join("info.txt"), info)?;

    info!(
        nodes = node_names.len(),
        out = %out_dir.display(),
        "network artifacts written"
    );
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
