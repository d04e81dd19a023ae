//! CLI configuration
//!
//! Environment defaults under the TRIAGE_ prefix; command-line flags
//! override them.

use anyhow::Result;
use serde::Deserialize;
use triage_lib::telemetry;

/// Simulation defaults loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct CliDefaults {
    /// Rows in the synthetic telemetry table
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Seed for telemetry generation and model training
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_samples() -> usize {
    telemetry::DEFAULT_SAMPLES
}

fn default_seed() -> u64 {
    telemetry::DEFAULT_SEED
}

impl CliDefaults {
    /// Load defaults from TRIAGE_* environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("TRIAGE").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| CliDefaults {
            samples: default_samples(),
            seed: default_seed(),
        }))
    }
}
