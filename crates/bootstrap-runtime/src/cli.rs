//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shared_types::PresetName;

use crate::config::BootstrapConfig;

/// Beacon chain testnet bootstrap: genesis state and bundle generation
#[derive(Parser, Debug)]
#[command(name = "bootstrap-runtime", version)]
#[command(about = "Builds deterministic genesis states and testnet bootstrap bundles")]
pub struct Cli {
    /// Log level filter (RUST_LOG takes precedence when set)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive keys, build the genesis state and write a bundle
    Generate(GenerateArgs),
    /// Replace the genesis time of an existing bundle
    Retime(RetimeArgs),
    /// Load, verify and summarize a bundle
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// YAML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of genesis validators
    #[arg(long)]
    pub validator_count: Option<u64>,

    /// Key derivation seed (0x-prefixed hex or plain text)
    #[arg(long)]
    pub seed: Option<String>,

    /// Network config: minimal, mainnet or altona
    #[arg(long)]
    pub preset: Option<PresetName>,

    /// Fixed genesis time in Unix seconds (default: now, rounded to the slot)
    #[arg(long)]
    pub genesis_time: Option<u64>,

    /// Seconds added to a clock-derived genesis time
    #[arg(long)]
    pub genesis_delay: Option<u64>,

    /// Bundle output directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Boot node address (repeatable; replaces configured addresses)
    #[arg(long = "boot-address")]
    pub boot_addresses: Vec<String>,

    /// Deposit contract reference
    #[arg(long)]
    pub deposit_contract: Option<String>,

    /// Derive keys on all cores
    #[arg(long)]
    pub parallel: bool,
}

impl GenerateArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply_to(&self, config: &mut BootstrapConfig) {
        if let Some(count) = self.validator_count {
            config.genesis.validator_count = count;
        }
        if let Some(seed) = &self.seed {
            config.genesis.seed = seed.clone();
        }
        if let Some(preset) = self.preset {
            config.genesis.preset = preset;
        }
        if let Some(time) = self.genesis_time {
            config.genesis.genesis_time = Some(time);
        }
        if let Some(delay) = self.genesis_delay {
            config.genesis.genesis_delay = delay;
        }
        if let Some(out_dir) = &self.out_dir {
            config.output.out_dir = out_dir.clone();
        }
        if !self.boot_addresses.is_empty() {
            config.network.boot_addresses = self.boot_addresses.clone();
        }
        if let Some(contract) = &self.deposit_contract {
            config.network.deposit_contract = contract.clone();
        }
        if self.parallel {
            config.genesis.parallel = true;
        }
    }
}

#[derive(Args, Debug)]
pub struct RetimeArgs {
    /// Existing bundle directory
    #[arg(long)]
    pub bundle: PathBuf,

    /// New genesis time in Unix seconds (default: now, rounded to the slot)
    #[arg(long)]
    pub genesis_time: Option<u64>,

    /// Seconds added to a clock-derived genesis time
    #[arg(long, default_value_t = 0)]
    pub genesis_delay: u64,

    /// Where to write the re-timed bundle (default: replace in place)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Bundle directory
    #[arg(long)]
    pub bundle: PathBuf,

    /// Expected preset (default: the bundle's own)
    #[arg(long)]
    pub preset: Option<PresetName>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}
