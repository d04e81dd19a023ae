//! One simulation run
//!
//! A `Simulation` owns the telemetry table, the optionally-trained models,
//! and the run's log collector; everything is scoped to the run and dropped
//! with it. The presentation layer drives `run` (or `run_with_hook` to
//! animate steps) and borrows the results for display.

use serde::{Deserialize, Serialize};

use crate::diagnosis;
use crate::error::{PipelineError, Result};
use crate::logging::{LogCollector, LogStage};
use crate::models::{DiagnosisResult, TelemetryTable};
use crate::telemetry;
use crate::trainer::{self, TrainedModels, TrainerConfig};

/// Parameters for one simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Rows in the synthetic telemetry table
    pub n_samples: usize,
    /// Seed for telemetry generation
    pub seed: u64,
    /// Model training parameters
    pub trainer: TrainerConfig,
    /// Row indices checked during `run`, in order
    pub sample_indices: Vec<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_samples: telemetry::DEFAULT_SAMPLES,
            seed: telemetry::DEFAULT_SEED,
            trainer: TrainerConfig::default(),
            // One known-nominal row plus one row from each fault window
            sample_indices: vec![10, 915, 935, 955],
        }
    }
}

/// Progress notification surfaced to the presentation layer.
///
/// The hook exists so a front end can animate output between steps; the
/// core never sleeps or paces itself.
#[derive(Debug, Clone)]
pub enum StepEvent {
    DataGenerated { rows: usize },
    ModelsTrained,
    SampleEvaluated { row_index: usize, result: DiagnosisResult },
}

/// One checked row and its diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleCheck {
    pub row_index: usize,
    pub result: DiagnosisResult,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub checks: Vec<SampleCheck>,
}

impl SimulationReport {
    /// Number of checks flagged anomalous
    pub fn anomalies(&self) -> usize {
        self.checks.iter().filter(|c| c.result.anomaly).count()
    }
}

/// A single simulation run: generation, training, and per-sample checks
pub struct Simulation {
    config: SimulationConfig,
    table: TelemetryTable,
    models: Option<TrainedModels>,
    log: LogCollector,
}

impl Simulation {
    /// Generate the telemetry table for a new run.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let table = telemetry::generate(config.n_samples, config.seed)?;
        Ok(Self {
            config,
            table,
            models: None,
            log: LogCollector::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn table(&self) -> &TelemetryTable {
        &self.table
    }

    pub fn log(&self) -> &LogCollector {
        &self.log
    }

    pub fn is_trained(&self) -> bool {
        self.models.is_some()
    }

    /// Fit the outlier detector and cause classifier on the table.
    pub fn train(&mut self) {
        self.log.push(
            LogStage::Train,
            "Training isolation forest and cause classifier...",
        );
        self.models = Some(trainer::train(&self.table, &self.config.trainer));
        self.log.push(LogStage::Success, "Models trained and deployed.");
    }

    /// Diagnose one row. Fails with [`PipelineError::NotTrained`] before
    /// `train`, and [`PipelineError::IndexOutOfRange`] for rows the table
    /// does not contain.
    pub fn evaluate(&mut self, row_index: usize) -> Result<DiagnosisResult> {
        let models = self.models.as_ref().ok_or(PipelineError::NotTrained)?;
        let result = diagnosis::evaluate(models, &self.table, row_index)?;

        if result.anomaly {
            self.log.push(
                LogStage::Warning,
                format!("Anomaly detected at T-{row_index}. Initiating diagnostics..."),
            );
            self.log.push(
                LogStage::Analysis,
                format!("Root cause identified: {}", result.cause),
            );
            if let Some(metric) = result.culprit_metric {
                self.log.push(
                    LogStage::Debug,
                    format!("Culprit metric: {metric} (z-score high)"),
                );
            }
            self.log.push(
                LogStage::Action,
                format!("Auto-remediation: {}", result.solution),
            );
        } else {
            self.log.push(
                LogStage::Info,
                format!("System check T-{row_index}: nominal."),
            );
        }

        Ok(result)
    }

    /// Run the full sequence over the configured sample indices.
    pub fn run(&mut self) -> Result<SimulationReport> {
        self.run_with_hook(|_| {})
    }

    /// Like [`Simulation::run`], notifying `hook` after each step.
    pub fn run_with_hook<F>(&mut self, mut hook: F) -> Result<SimulationReport>
    where
        F: FnMut(&StepEvent),
    {
        self.log.push(
            LogStage::Init,
            "Connecting to server telemetry stream...",
        );
        hook(&StepEvent::DataGenerated {
            rows: self.table.len(),
        });

        self.train();
        hook(&StepEvent::ModelsTrained);

        let indices = self.config.sample_indices.clone();
        let mut checks = Vec::with_capacity(indices.len());
        for row_index in indices {
            let result = self.evaluate(row_index)?;
            hook(&StepEvent::SampleEvaluated {
                row_index,
                result: result.clone(),
            });
            checks.push(SampleCheck { row_index, result });
        }

        Ok(SimulationReport { checks })
    }
}
