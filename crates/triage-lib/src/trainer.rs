//! Model training over a generated telemetry table
//!
//! Fits the outlier detector and the cause classifier once per run; both are
//! read-only afterwards and discarded at run end. The full-table column
//! statistics used by z-score attribution are computed here as well.

use tracing::info;

use crate::ml::{DecisionTreeClassifier, IsolationForest, IsolationForestConfig};
use crate::models::{TelemetryTable, FEATURE_COUNT};

/// Training parameters
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Expected fraction of outliers in the training table
    pub contamination: f64,
    /// Isolation forest ensemble size
    pub num_trees: usize,
    /// Rows subsampled per isolation tree
    pub sample_size: usize,
    /// Seed for the detector's internal randomness
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            contamination: 0.05,
            num_trees: 100,
            sample_size: 256,
            seed: 42,
        }
    }
}

/// Per-column mean and standard deviation over the full training table.
///
/// Computed once over all rows, injected anomalies included.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    means: [f64; FEATURE_COUNT],
    std_devs: [f64; FEATURE_COUNT],
}

impl ColumnStats {
    pub fn compute(table: &TelemetryTable) -> Self {
        let n = table.len() as f64;
        let mut means = [0.0; FEATURE_COUNT];
        let mut std_devs = [0.0; FEATURE_COUNT];

        for sample in table.samples() {
            for (acc, value) in means.iter_mut().zip(sample.features()) {
                *acc += value;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        if table.len() > 1 {
            for sample in table.samples() {
                for ((acc, value), mean) in std_devs.iter_mut().zip(sample.features()).zip(means) {
                    *acc += (value - mean).powi(2);
                }
            }
            for acc in &mut std_devs {
                // Sample variance (Bessel's correction)
                *acc = (*acc / (n - 1.0)).sqrt();
            }
        }

        Self { means, std_devs }
    }

    pub fn mean(&self, column: usize) -> f64 {
        self.means[column]
    }

    pub fn std_dev(&self, column: usize) -> f64 {
        self.std_devs[column]
    }

    /// Signed deviations of one feature row, in column standard deviations.
    /// Columns with zero spread contribute zero.
    pub fn z_scores(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scores = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            if self.std_devs[i] > f64::EPSILON {
                scores[i] = (features[i] - self.means[i]) / self.std_devs[i];
            }
        }
        scores
    }
}

/// The models fitted for one run, reused read-only for every evaluation
pub struct TrainedModels {
    detector: IsolationForest,
    classifier: DecisionTreeClassifier,
    stats: ColumnStats,
}

impl TrainedModels {
    pub fn detector(&self) -> &IsolationForest {
        &self.detector
    }

    pub fn classifier(&self) -> &DecisionTreeClassifier {
        &self.classifier
    }

    pub fn stats(&self) -> &ColumnStats {
        &self.stats
    }
}

/// Fit the outlier detector and cause classifier on the table.
pub fn train(table: &TelemetryTable, config: &TrainerConfig) -> TrainedModels {
    let features = table.feature_matrix();
    let labels = table.labels();

    let detector = IsolationForest::fit(
        &features,
        &IsolationForestConfig {
            num_trees: config.num_trees,
            sample_size: config.sample_size,
            contamination: config.contamination,
            seed: config.seed,
        },
    );
    let classifier = DecisionTreeClassifier::fit(&features, &labels);
    let stats = ColumnStats::compute(table);

    info!(
        rows = table.len(),
        num_trees = config.num_trees,
        contamination = config.contamination,
        "trained outlier detector and cause classifier"
    );

    TrainedModels {
        detector,
        classifier,
        stats,
    }
}
