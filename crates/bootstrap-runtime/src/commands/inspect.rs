//! `inspect`: load, verify, summarize.

use std::path::Path;

use anyhow::{Context, Result};
use bb_04_genesis_time::format_utc;
use bb_05_testnet_bundle::{format_root, TestnetBundle};
use serde::Serialize;
use shared_types::{PresetConfig, PresetName};

use crate::cli::InspectArgs;

/// What `inspect` prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSummary {
    pub preset: PresetName,
    pub genesis_time: u64,
    pub genesis_time_utc: String,
    pub genesis_state_root: String,
    pub genesis_validators_root: String,
    pub validator_count: u64,
    pub boot_addresses: Vec<String>,
    pub deposit_contract: String,
    pub state_bytes: usize,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let summary = inspect(&args.bundle, args.preset)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render(&summary));
    }
    Ok(())
}

/// Verify the bundle in `dir`. With `expected` set, a bundle built for
/// another preset is a mismatch.
pub fn inspect(dir: &Path, expected: Option<PresetName>) -> Result<BundleSummary> {
    let config = TestnetBundle::read_config(dir)
        .with_context(|| format!("Failed to read bundle {}", dir.display()))?;
    let preset = match expected {
        Some(name) if name.as_str() != config.config_name => PresetConfig::for_name(name),
        _ => config.preset()?,
    };
    let bundle = TestnetBundle::load(dir, &preset)?;

    Ok(BundleSummary {
        preset: bundle.preset_name,
        genesis_time: bundle.genesis_time,
        genesis_time_utc: format_utc(bundle.genesis_time),
        genesis_state_root: format_root(&bundle.genesis_state_root),
        genesis_validators_root: format_root(&bundle.genesis_validators_root),
        validator_count: bundle.validator_count,
        boot_addresses: bundle
            .boot_addresses
            .iter()
            .map(|address| address.to_string())
            .collect(),
        deposit_contract: bundle.deposit_contract,
        state_bytes: bundle.encoded_state.len(),
    })
}

fn render(summary: &BundleSummary) -> String {
    let mut out = format!(
        "preset:                  {}\n\
         genesis time:            {} ({})\n\
         genesis state root:      {}\n\
         genesis validators root: {}\n\
         validators:              {}\n\
         deposit contract:        {}\n\
         state size:              {} bytes\n",
        summary.preset,
        summary.genesis_time,
        summary.genesis_time_utc,
        summary.genesis_state_root,
        summary.genesis_validators_root,
        summary.validator_count,
        summary.deposit_contract,
        summary.state_bytes,
    );
    for address in &summary.boot_addresses {
        out.push_str(&format!("boot address:            {address}\n"));
    }
    out
}
