//! # Genesis Time Injector
//!
//! A genesis time is either requested explicitly (used verbatim) or taken
//! from the wall clock, rounded down to the slot duration and pushed out by
//! the configured delay. Once chosen it is written into the bundle and
//! never recomputed by a node.

use std::sync::Arc;

use shared_types::{BeaconState, PresetConfig};
use tracing::{debug, info};

use crate::adapters::SystemTimeSource;
use crate::errors::GenesisTimeError;
use crate::ports::TimeSource;

/// Resolves genesis times against a clock.
#[derive(Clone)]
pub struct GenesisTimeInjector {
    time_source: Arc<dyn TimeSource>,
    granularity: u64,
    genesis_delay: u64,
}

impl GenesisTimeInjector {
    /// Injector for `preset`: rounds "now" to `seconds_per_slot`, no delay.
    pub fn new(preset: &PresetConfig) -> Self {
        Self::with_time_source(preset, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(preset: &PresetConfig, time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            time_source,
            granularity: preset.seconds_per_slot,
            genesis_delay: 0,
        }
    }

    /// Seconds added to a clock-derived genesis time.
    pub fn with_genesis_delay(mut self, genesis_delay: u64) -> Self {
        self.genesis_delay = genesis_delay;
        self
    }

    /// Rounding granularity in seconds. 0 or 1 disables rounding.
    pub fn with_granularity(mut self, granularity: u64) -> Self {
        self.granularity = granularity;
        self
    }

    /// The requested time if given, otherwise rounded "now" plus delay.
    pub fn resolve_genesis_time(&self, requested: Option<u64>) -> Result<u64, GenesisTimeError> {
        if let Some(time) = requested {
            info!(genesis_time = time, utc = %format_utc(time), "Using requested genesis time");
            return Ok(time);
        }

        let now = self.time_source.now();
        let rounded = match self.granularity {
            0 | 1 => now,
            granularity => now - now % granularity,
        };
        let time = rounded
            .checked_add(self.genesis_delay)
            .ok_or(GenesisTimeError::Overflow {
                now: rounded,
                delay: self.genesis_delay,
            })?;

        debug!(now, rounded, delay = self.genesis_delay, "Derived genesis time from clock");
        info!(genesis_time = time, utc = %format_utc(time), "Using clock genesis time");
        Ok(time)
    }
}

impl std::fmt::Debug for GenesisTimeInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenesisTimeInjector")
            .field("granularity", &self.granularity)
            .field("genesis_delay", &self.genesis_delay)
            .finish_non_exhaustive()
    }
}

/// Copy of `state` with a new genesis time.
pub fn inject_genesis_time(state: &BeaconState, genesis_time: u64) -> BeaconState {
    BeaconState {
        genesis_time,
        ..state.clone()
    }
}

/// Re-time an encoded state: decode under `preset`, replace the time,
/// re-encode.
pub fn retime_encoded(
    bytes: &[u8],
    preset: &PresetConfig,
    genesis_time: u64,
) -> Result<Vec<u8>, GenesisTimeError> {
    let state = BeaconState::decode(bytes, preset)?;
    let previous = state.genesis_time;
    let retimed = inject_genesis_time(&state, genesis_time).encode(preset)?;
    info!(
        previous,
        genesis_time,
        utc = %format_utc(genesis_time),
        "Re-timed encoded genesis state"
    );
    Ok(retimed)
}

/// RFC 3339 rendering for logs; falls back to the raw number.
pub fn format_utc(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
