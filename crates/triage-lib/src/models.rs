//! Core data models for the triage pipeline

use serde::{Deserialize, Serialize};

/// Number of numeric feature columns in a telemetry sample
pub const FEATURE_COUNT: usize = 4;

/// A numeric metric column, in canonical column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CpuUsage,
    MemoryUsage,
    NetworkLatency,
    ErrorRate,
}

impl Metric {
    /// All metrics in canonical column order; ties in attribution resolve
    /// to the earliest entry here.
    pub const ALL: [Metric; FEATURE_COUNT] = [
        Metric::CpuUsage,
        Metric::MemoryUsage,
        Metric::NetworkLatency,
        Metric::ErrorRate,
    ];

    /// Column name as recorded in telemetry
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::CpuUsage => "cpu_usage",
            Metric::MemoryUsage => "memory_usage",
            Metric::NetworkLatency => "network_latency",
            Metric::ErrorRate => "error_rate",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnosed root cause of a telemetry sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootCause {
    Normal,
    #[serde(rename = "High_CPU")]
    HighCpu,
    #[serde(rename = "Network_Lag")]
    NetworkLag,
    #[serde(rename = "Memory_Leak")]
    MemoryLeak,
}

impl RootCause {
    /// Canonical label string, as used in training data
    pub fn label(&self) -> &'static str {
        match self {
            RootCause::Normal => "Normal",
            RootCause::HighCpu => "High_CPU",
            RootCause::NetworkLag => "Network_Lag",
            RootCause::MemoryLeak => "Memory_Leak",
        }
    }

    /// Parse a label string; `None` for anything outside the closed set
    pub fn from_label(label: &str) -> Option<RootCause> {
        match label {
            "Normal" => Some(RootCause::Normal),
            "High_CPU" => Some(RootCause::HighCpu),
            "Network_Lag" => Some(RootCause::NetworkLag),
            "Memory_Leak" => Some(RootCause::MemoryLeak),
            _ => None,
        }
    }
}

impl std::fmt::Display for RootCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of server telemetry with its ground-truth label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub network_latency: f64,
    pub error_rate: f64,
    pub root_cause: RootCause,
}

impl TelemetrySample {
    /// Numeric feature columns in canonical order (label excluded)
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.cpu_usage,
            self.memory_usage,
            self.network_latency,
            self.error_rate,
        ]
    }

    /// Value of a single metric column
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CpuUsage => self.cpu_usage,
            Metric::MemoryUsage => self.memory_usage,
            Metric::NetworkLatency => self.network_latency,
            Metric::ErrorRate => self.error_rate,
        }
    }
}

/// Fixed-size table of telemetry samples, addressed by dense zero-based index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryTable {
    samples: Vec<TelemetrySample>,
}

impl TelemetryTable {
    pub fn new(samples: Vec<TelemetrySample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TelemetrySample> {
        self.samples.get(index)
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// Feature rows for model fitting (labels excluded)
    pub fn feature_matrix(&self) -> Vec<[f64; FEATURE_COUNT]> {
        self.samples.iter().map(TelemetrySample::features).collect()
    }

    /// Ground-truth labels, row-aligned with `feature_matrix`
    pub fn labels(&self) -> Vec<RootCause> {
        self.samples.iter().map(|s| s.root_cause).collect()
    }
}

/// Outcome of evaluating one telemetry sample
///
/// `cause`, `culprit_metric`, and the remediation text are only meaningful
/// when `anomaly` is true; nominal samples carry `Normal`, no culprit, and
/// the advisor's healthy-system string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub anomaly: bool,
    pub cause: RootCause,
    pub culprit_metric: Option<Metric>,
    pub solution: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_canonical_order() {
        assert_eq!(Metric::ALL[0], Metric::CpuUsage);
        assert_eq!(Metric::ALL[3], Metric::ErrorRate);
        assert_eq!(Metric::NetworkLatency.as_str(), "network_latency");
    }

    #[test]
    fn test_root_cause_label_round_trip() {
        for cause in [
            RootCause::Normal,
            RootCause::HighCpu,
            RootCause::NetworkLag,
            RootCause::MemoryLeak,
        ] {
            assert_eq!(RootCause::from_label(cause.label()), Some(cause));
        }
        assert_eq!(RootCause::from_label("Disk_Full"), None);
    }

    #[test]
    fn test_features_align_with_metric_order() {
        let sample = TelemetrySample {
            cpu_usage: 1.0,
            memory_usage: 2.0,
            network_latency: 3.0,
            error_rate: 4.0,
            root_cause: RootCause::Normal,
        };
        let features = sample.features();
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(features[i], sample.metric(*metric));
        }
    }
}
