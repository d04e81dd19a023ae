//! Core library for the AIOps triage agent
//!
//! This crate provides the full diagnosis pipeline:
//! - Synthetic telemetry generation with injected fault windows
//! - Training of an outlier detector and a root-cause classifier
//! - Per-sample diagnosis with z-score attribution
//! - Remediation advice
//! - A run-scoped simulation session and log collector

pub mod advisor;
pub mod diagnosis;
pub mod error;
pub mod logging;
pub mod ml;
pub mod models;
pub mod simulation;
pub mod telemetry;
pub mod trainer;

pub use error::{PipelineError, Result};
pub use logging::{LogCollector, LogEntry, LogStage};
pub use models::{DiagnosisResult, Metric, RootCause, TelemetrySample, TelemetryTable};
pub use simulation::{SampleCheck, Simulation, SimulationConfig, SimulationReport, StepEvent};
pub use trainer::{ColumnStats, TrainedModels, TrainerConfig};
