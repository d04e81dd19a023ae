//! End-to-end pipeline tests: generate, train, evaluate, advise

use triage_lib::{
    advisor, diagnosis, telemetry,
    trainer::{self, TrainerConfig},
    Metric, PipelineError, RootCause, Simulation, SimulationConfig,
};

fn trained_defaults() -> (triage_lib::TelemetryTable, triage_lib::TrainedModels) {
    let table = telemetry::generate(telemetry::DEFAULT_SAMPLES, telemetry::DEFAULT_SEED)
        .expect("default table generates");
    let models = trainer::train(&table, &TrainerConfig::default());
    (table, models)
}

#[test]
fn generation_is_deterministic() {
    let a = telemetry::generate(1000, 42).unwrap();
    let b = telemetry::generate(1000, 42).unwrap();
    assert_eq!(a, b);
}

#[test]
fn nominal_row_reports_healthy() {
    let (table, models) = trained_defaults();

    let result = diagnosis::evaluate(&models, &table, 10).unwrap();
    assert!(!result.anomaly);
    assert_eq!(result.cause, RootCause::Normal);
    assert_eq!(result.culprit_metric, None);
    assert_eq!(result.solution, advisor::recommend(RootCause::Normal));
}

#[test]
fn cpu_fault_window_row_diagnosed() {
    let (table, models) = trained_defaults();

    let result = diagnosis::evaluate(&models, &table, 915).unwrap();
    assert!(result.anomaly);
    assert_eq!(result.cause, RootCause::HighCpu);
    assert_eq!(result.culprit_metric, Some(Metric::CpuUsage));
    assert_eq!(result.solution, advisor::recommend(RootCause::HighCpu));
}

#[test]
fn network_fault_window_row_diagnosed() {
    let (table, models) = trained_defaults();

    let result = diagnosis::evaluate(&models, &table, 935).unwrap();
    assert!(result.anomaly);
    assert_eq!(result.cause, RootCause::NetworkLag);
    assert_eq!(result.culprit_metric, Some(Metric::NetworkLatency));
}

#[test]
fn memory_fault_window_row_diagnosed() {
    let (table, models) = trained_defaults();

    let result = diagnosis::evaluate(&models, &table, 955).unwrap();
    assert!(result.anomaly);
    assert_eq!(result.cause, RootCause::MemoryLeak);
    assert_eq!(result.culprit_metric, Some(Metric::MemoryUsage));
}

#[test]
fn out_of_bounds_rows_rejected() {
    let (table, models) = trained_defaults();

    for index in [table.len(), table.len() + 500] {
        assert_eq!(
            diagnosis::evaluate(&models, &table, index).unwrap_err(),
            PipelineError::IndexOutOfRange {
                index,
                len: table.len()
            }
        );
    }
}

#[test]
fn repeated_evaluation_is_identical() {
    let (table, models) = trained_defaults();

    for index in [10, 915, 935, 955] {
        let first = diagnosis::evaluate(&models, &table, index).unwrap();
        let second = diagnosis::evaluate(&models, &table, index).unwrap();
        assert_eq!(first, second, "row {index}");
    }
}

#[test]
fn full_simulation_run_matches_per_row_diagnosis() {
    let (table, models) = trained_defaults();

    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.checks.len(), 4);
    for check in &report.checks {
        let direct = diagnosis::evaluate(&models, &table, check.row_index).unwrap();
        assert_eq!(check.result, direct, "row {}", check.row_index);
    }
    // The three fault-window rows are extreme outliers
    assert!(report.anomalies() >= 3);
}

#[test]
fn report_serializes_to_json() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let report = sim.run().unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"checks\""));
    let parsed: triage_lib::SimulationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}
