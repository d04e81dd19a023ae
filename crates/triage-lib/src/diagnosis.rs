//! Per-sample diagnosis
//!
//! Runs the outlier detector on a single table row, and for anomalous rows
//! adds the classifier's cause label, z-score attribution of the most
//! deviant metric, and the advisor's remediation.

use tracing::{debug, info};

use crate::advisor;
use crate::error::{PipelineError, Result};
use crate::models::{DiagnosisResult, Metric, RootCause, TelemetryTable, FEATURE_COUNT};
use crate::trainer::TrainedModels;

/// Evaluate one row of the table against the trained models.
pub fn evaluate(
    models: &TrainedModels,
    table: &TelemetryTable,
    row_index: usize,
) -> Result<DiagnosisResult> {
    let sample = table.get(row_index).ok_or(PipelineError::IndexOutOfRange {
        index: row_index,
        len: table.len(),
    })?;
    let features = sample.features();

    if !models.detector().is_outlier(&features) {
        debug!(row = row_index, "sample within normal envelope");
        return Ok(DiagnosisResult {
            anomaly: false,
            cause: RootCause::Normal,
            culprit_metric: None,
            solution: advisor::recommend(RootCause::Normal).to_string(),
        });
    }

    let cause = models.classifier().predict(&features);
    let z_scores = models.stats().z_scores(&features);
    let culprit_column = pick_culprit_column(&z_scores);
    let culprit = Metric::ALL[culprit_column];

    info!(
        row = row_index,
        cause = %cause,
        culprit = %culprit,
        z_score = z_scores[culprit_column],
        "anomaly diagnosed"
    );

    Ok(DiagnosisResult {
        anomaly: true,
        cause,
        culprit_metric: Some(culprit),
        solution: advisor::recommend(cause).to_string(),
    })
}

/// Column with the largest absolute deviation; ties keep the earliest
/// column in canonical order.
fn pick_culprit_column(z_scores: &[f64; FEATURE_COUNT]) -> usize {
    let mut best = 0;
    for i in 1..FEATURE_COUNT {
        if z_scores[i].abs() > z_scores[best].abs() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry;
    use crate::trainer::{self, TrainerConfig};

    #[test]
    fn test_culprit_is_largest_absolute_deviation() {
        let culprit = |z: &[f64; FEATURE_COUNT]| Metric::ALL[pick_culprit_column(z)];
        assert_eq!(culprit(&[0.5, -3.0, 1.0, 2.0]), Metric::MemoryUsage);
        assert_eq!(culprit(&[0.1, 0.2, -0.3, 0.25]), Metric::NetworkLatency);
    }

    #[test]
    fn test_culprit_ties_keep_canonical_order() {
        let culprit = |z: &[f64; FEATURE_COUNT]| Metric::ALL[pick_culprit_column(z)];
        assert_eq!(culprit(&[2.0, -2.0, 2.0, 2.0]), Metric::CpuUsage);
        assert_eq!(culprit(&[0.0, 0.0, 0.0, 0.0]), Metric::CpuUsage);
        assert_eq!(culprit(&[1.0, 2.0, -2.0, 1.0]), Metric::MemoryUsage);
    }

    #[test]
    fn test_index_out_of_range() {
        let table = telemetry::generate(1000, 42).unwrap();
        let models = trainer::train(&table, &TrainerConfig::default());

        let err = evaluate(&models, &table, 1000).unwrap_err();
        assert_eq!(err, PipelineError::IndexOutOfRange { index: 1000, len: 1000 });
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let table = telemetry::generate(1000, 42).unwrap();
        let models = trainer::train(&table, &TrainerConfig::default());

        let first = evaluate(&models, &table, 915).unwrap();
        let second = evaluate(&models, &table, 915).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nominal_sample_reports_no_culprit() {
        let table = telemetry::generate(1000, 42).unwrap();
        let models = trainer::train(&table, &TrainerConfig::default());

        let result = evaluate(&models, &table, 10).unwrap();
        if !result.anomaly {
            assert_eq!(result.cause, RootCause::Normal);
            assert_eq!(result.culprit_metric, None);
            assert!(!result.solution.is_empty());
        }
    }
}
