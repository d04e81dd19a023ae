//! AIOps Triage Agent CLI
//!
//! A command-line tool that runs the monitoring simulation: synthetic
//! telemetry, anomaly detection, root-cause diagnosis, and remediation
//! advice, with the agent's log rendered at the end.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{data, run};

/// AIOps Triage Agent CLI
#[derive(Parser)]
#[command(name = "triage")]
#[command(author, version, about = "AIOps triage agent: detects, diagnoses, and resolves system anomalies", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full monitoring simulation
    Run {
        /// Rows in the synthetic telemetry table
        #[arg(long)]
        samples: Option<usize>,

        /// Seed for telemetry generation and model training
        #[arg(long)]
        seed: Option<u64>,

        /// Row indices to check, comma-separated
        #[arg(long, value_delimiter = ',')]
        indices: Option<Vec<usize>>,

        /// Pause between displayed steps (milliseconds)
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },

    /// Inspect the generated telemetry table
    Data {
        /// Rows in the synthetic telemetry table
        #[arg(long)]
        samples: Option<usize>,

        /// Seed for telemetry generation
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so tables and JSON stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let defaults = config::CliDefaults::load()?;

    match cli.command {
        Commands::Run {
            samples,
            seed,
            indices,
            delay_ms,
        } => run::run_simulation(
            samples.unwrap_or(defaults.samples),
            seed.unwrap_or(defaults.seed),
            indices,
            delay_ms,
            cli.format,
        ),
        Commands::Data { samples, seed } => data::show_data(
            samples.unwrap_or(defaults.samples),
            seed.unwrap_or(defaults.seed),
            cli.format,
        ),
    }
}
