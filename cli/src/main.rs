//! poaforge — deterministic bootstrapper for private proof-of-authority
//! (Clique) test networks.

mod artifacts;
mod scripts;

use anyhow::Context;
use clap::Parser;
use poaforge_plan::{KeySource, NetworkConfig, NetworkPlan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "poaforge", about = "Private proof-of-authority network bootstrapper")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "POAFORGE_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a network: identities, genesis, ports, bootnode, scripts.
    Generate {
        /// Path to a TOML configuration file; defaults apply when omitted.
        #[arg(long, env = "POAFORGE_CONFIG")]
        config: Option<PathBuf>,

        /// Output directory for all artifacts.
        #[arg(long, default_value = ".", env = "POAFORGE_OUT_DIR")]
        out: PathBuf,

        /// Overwrite existing node directories.
        #[arg(long)]
        force: bool,
    },
    /// Print the default configuration as TOML.
    PrintConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Generate { config, out, force } => {
            let config = match config {
                Some(path) => {
                    let path_str = path.to_string_lossy();
                    let loaded = NetworkConfig::from_toml_file(&path_str)
                        .with_context(|| format!("failed to load config from {path_str}"))?;
                    tracing::info!("Loaded config from {path_str}");
                    loaded
                }
                None => NetworkConfig::default(),
            };

            let mut plan = NetworkPlan::new(config.clone())?;
            match plan.key_source() {
                KeySource::Mnemonic(_) => {
                    tracing::info!("Deriving validator keys from mnemonic (reproducible run)")
                }
                KeySource::Random => tracing::info!("Generating random validator keys"),
            }

            let node_count = config.resolved_node_names().len();
            tracing::info!(
                "Generating {} node network (chain id {}, period {}s)",
                node_count,
                config.chain_id,
                config.period,
            );

            plan.generate_identities()?;
            plan.assemble_genesis()?;
            plan.allocate_ports()?;
            plan.finalize()?;
            let artifacts = plan.into_artifacts()?;
            artifacts::write_network(&out, &config, &artifacts, force)?;

            tracing::info!("Bootnode: {}", artifacts.bootnode.url);
            tracing::info!("Done. Run init.sh, startBootnode.sh, then the per-node scripts.");
        }
        Command::PrintConfig => {
            print!("{}", NetworkConfig::default().to_toml_string());
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
