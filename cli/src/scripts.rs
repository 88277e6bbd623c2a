//! Shell-script text generation for node and bootnode launch.
//!
//! The tool only emits script text; it never spawns `geth` or `bootnode`
//! itself.

use poaforge_plan::PortAssignment;

/// The launch script for one node.
///
/// Embeds the node's port triple, its unlock/etherbase address, the network
/// id, the password file, and the bootnode URL.
pub fn launch_script(
    node_name: &str,
    address: &str,
    ports: &PortAssignment,
    chain_id: u64,
    enode_url: &str,
) -> String {
    format!(
        "#!/bin/sh\n\
         geth --datadir ./{node} --syncmode 'full' \
         --http --http.addr '127.0.0.1' --http.port {http} \
         --http.api 'personal,eth,net,web3,txpool,miner' --http.corsdomain \"*\" \
         --networkid {chain_id} --bootnodes '{enode}' \
         --rpc.allow-unprotected-txs --allow-insecure-unlock \
         --miner.etherbase {address} --unlock {address} --password {node}/password.txt \
         --port {p2p} --authrpc.port {authrpc} --mine\n",
        node = node_name,
        http = ports.http_port,
        chain_id = chain_id,
        enode = enode_url,
        address = address,
        p2p = ports.p2p_port,
        authrpc = ports.auth_rpc_port,
    )
}

/// The bootnode launch script.
pub fn bootnode_script(bind_address: &str, discovery_port: u16) -> String {
    format!(
        "#!/bin/sh\nbootnode --nodekey=bootnode.key --addr {}:{}\n",
        bind_address, discovery_port
    )
}

/// The one-shot genesis initialization script: one `geth init` per node.
pub fn init_script(node_names: &[String]) -> String {
    let mut script = String::from("#!/bin/sh\n");
    for name in node_names {
        script.push_str(&format!(
            "geth --datadir ./{name} init ./{name}/genesis.json\n"
        ));
    }
    script
}
