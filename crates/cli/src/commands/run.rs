//! Run a full monitoring simulation

use std::thread;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use triage_lib::{
    LogEntry, Simulation, SimulationConfig, SimulationReport, StepEvent, TrainerConfig,
};

use crate::output::{
    color_cause, color_verdict, print_heading, print_info, print_success, print_table,
    print_warning, OutputFormat,
};

/// Row for the diagnosis table
#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Root Cause")]
    cause: String,
    #[tabled(rename = "Culprit Metric")]
    culprit: String,
    #[tabled(rename = "Recommendation")]
    solution: String,
}

/// JSON payload for `--format json`
#[derive(Serialize)]
struct RunOutput<'a> {
    report: &'a SimulationReport,
    log: &'a [LogEntry],
}

pub fn run_simulation(
    samples: usize,
    seed: u64,
    indices: Option<Vec<usize>>,
    delay_ms: u64,
    format: OutputFormat,
) -> Result<()> {
    let mut config = SimulationConfig {
        n_samples: samples,
        seed,
        trainer: TrainerConfig {
            seed,
            ..TrainerConfig::default()
        },
        ..SimulationConfig::default()
    };
    if let Some(indices) = indices {
        config.sample_indices = indices;
    }

    let mut sim = Simulation::new(config)?;
    let pace = Duration::from_millis(delay_ms);

    let report = match format {
        OutputFormat::Json => sim.run()?,
        OutputFormat::Table => sim.run_with_hook(|event| {
            match event {
                StepEvent::DataGenerated { rows } => {
                    print_info(&format!("Connected to telemetry stream ({rows} rows)"));
                }
                StepEvent::ModelsTrained => {
                    print_success("Models trained and deployed");
                }
                StepEvent::SampleEvaluated { row_index, result } => {
                    if result.anomaly {
                        print_warning(&format!(
                            "T-{row_index}: anomaly detected ({})",
                            result.cause
                        ));
                    } else {
                        print_info(&format!("T-{row_index}: nominal"));
                    }
                }
            }
            if !pace.is_zero() {
                thread::sleep(pace);
            }
        })?,
    };

    match format {
        OutputFormat::Json => {
            let output = RunOutput {
                report: &report,
                log: sim.log().entries(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_heading("Diagnosis");
            let rows: Vec<CheckRow> = report
                .checks
                .iter()
                .map(|check| CheckRow {
                    row: check.row_index,
                    status: color_verdict(check.result.anomaly),
                    cause: color_cause(check.result.cause),
                    culprit: check
                        .result
                        .culprit_metric
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    solution: check.result.solution.clone(),
                })
                .collect();
            print_table(&rows);

            print_heading("Agent Logs");
            println!("{}", sim.log().render());
        }
    }

    Ok(())
}
