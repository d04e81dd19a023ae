//! Synthetic telemetry generation
//!
//! Produces a fixed-size table of server metrics with deterministic injected
//! fault windows and threshold-derived ground-truth labels. The same seed
//! always yields the same table.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Poisson};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{RootCause, TelemetrySample, TelemetryTable};

/// Default number of rows in the synthetic table
pub const DEFAULT_SAMPLES: usize = 1000;

/// Default seed shared by generation and model training
pub const DEFAULT_SEED: u64 = 42;

/// Injected fault windows, inclusive row ranges
pub const HIGH_CPU_WINDOW: (usize, usize) = (900, 920);
pub const NETWORK_LAG_WINDOW: (usize, usize) = (930, 940);
pub const MEMORY_LEAK_WINDOW: (usize, usize) = (950, 960);

/// Smallest table that can host all fault windows
pub const MIN_SAMPLES: usize = MEMORY_LEAK_WINDOW.1 + 1;

/// Labeling thresholds, checked in priority order
const HIGH_CPU_THRESHOLD: f64 = 80.0;
const NETWORK_LAG_THRESHOLD: f64 = 200.0;
const MEMORY_LEAK_THRESHOLD: f64 = 85.0;

/// Generate the synthetic telemetry table.
///
/// Baseline columns are drawn per row (cpu ~ N(30,5), memory ~ N(40,5),
/// latency ~ N(50,10), errors ~ Poisson(1)), then the fault windows are
/// overwritten with fresh draws from shifted distributions.
pub fn generate(n_samples: usize, seed: u64) -> Result<TelemetryTable> {
    if n_samples < MIN_SAMPLES {
        return Err(PipelineError::InvalidSampleCount {
            requested: n_samples,
            minimum: MIN_SAMPLES,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut cpu = draw_normal(&mut rng, 30.0, 5.0, n_samples);
    let mut memory = draw_normal(&mut rng, 40.0, 5.0, n_samples);
    let mut latency = draw_normal(&mut rng, 50.0, 10.0, n_samples);
    let errors = draw_poisson(&mut rng, 1.0, n_samples);

    // Runaway process
    overwrite_window(&mut cpu, HIGH_CPU_WINDOW, &mut rng, 90.0, 5.0);
    // Traffic flood
    overwrite_window(&mut latency, NETWORK_LAG_WINDOW, &mut rng, 500.0, 50.0);
    // Leaking application
    overwrite_window(&mut memory, MEMORY_LEAK_WINDOW, &mut rng, 95.0, 2.0);

    let samples = (0..n_samples)
        .map(|i| TelemetrySample {
            cpu_usage: cpu[i],
            memory_usage: memory[i],
            network_latency: latency[i],
            error_rate: errors[i],
            root_cause: label_for(cpu[i], latency[i], memory[i]),
        })
        .collect();

    debug!(rows = n_samples, seed, "generated synthetic telemetry table");
    Ok(TelemetryTable::new(samples))
}

/// Derive the ground-truth label from metric thresholds.
///
/// Priority order: High_CPU wins over Network_Lag, which wins over
/// Memory_Leak; anything below all thresholds is Normal.
pub fn label_for(cpu_usage: f64, network_latency: f64, memory_usage: f64) -> RootCause {
    if cpu_usage > HIGH_CPU_THRESHOLD {
        RootCause::HighCpu
    } else if network_latency > NETWORK_LAG_THRESHOLD {
        RootCause::NetworkLag
    } else if memory_usage > MEMORY_LEAK_THRESHOLD {
        RootCause::MemoryLeak
    } else {
        RootCause::Normal
    }
}

fn draw_normal(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64, count: usize) -> Vec<f64> {
    let dist = Normal::new(mean, std_dev).expect("finite distribution parameters");
    (0..count).map(|_| dist.sample(rng)).collect()
}

fn draw_poisson(rng: &mut ChaCha8Rng, mean: f64, count: usize) -> Vec<f64> {
    let dist = Poisson::new(mean).expect("finite distribution parameters");
    (0..count).map(|_| dist.sample(rng)).collect()
}

fn overwrite_window(
    column: &mut [f64],
    window: (usize, usize),
    rng: &mut ChaCha8Rng,
    mean: f64,
    std_dev: f64,
) {
    let dist = Normal::new(mean, std_dev).expect("finite distribution parameters");
    for value in &mut column[window.0..=window.1] {
        *value = dist.sample(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let a = generate(DEFAULT_SAMPLES, DEFAULT_SEED).unwrap();
        let b = generate(DEFAULT_SAMPLES, DEFAULT_SEED).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(DEFAULT_SAMPLES, 42).unwrap();
        let b = generate(DEFAULT_SAMPLES, 43).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_table_too_small_for_windows() {
        let err = generate(MIN_SAMPLES - 1, DEFAULT_SEED).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidSampleCount {
                requested: MIN_SAMPLES - 1,
                minimum: MIN_SAMPLES,
            }
        );
        assert!(generate(MIN_SAMPLES, DEFAULT_SEED).is_ok());
    }

    #[test]
    fn test_fault_windows_are_shifted() {
        let table = generate(DEFAULT_SAMPLES, DEFAULT_SEED).unwrap();
        let window_mean = |lo: usize, hi: usize, f: fn(&TelemetrySample) -> f64| {
            let values: Vec<f64> = (lo..=hi).map(|i| f(table.get(i).unwrap())).collect();
            values.iter().sum::<f64>() / values.len() as f64
        };

        // Shifted means sit far above the baseline distributions
        assert!(window_mean(900, 920, |s| s.cpu_usage) > 70.0);
        assert!(window_mean(930, 940, |s| s.network_latency) > 300.0);
        assert!(window_mean(950, 960, |s| s.memory_usage) > 88.0);

        // Rows outside the windows keep baseline-scale values
        let baseline_cpu = window_mean(0, 500, |s| s.cpu_usage);
        assert!(baseline_cpu > 25.0 && baseline_cpu < 35.0);
    }

    #[test]
    fn test_window_labels_follow_thresholds() {
        let table = generate(DEFAULT_SAMPLES, DEFAULT_SEED).unwrap();
        for i in 900..=920 {
            let s = table.get(i).unwrap();
            if s.cpu_usage > 80.0 {
                assert_eq!(s.root_cause, RootCause::HighCpu, "row {i}");
            }
        }
        for i in 930..=940 {
            let s = table.get(i).unwrap();
            if s.network_latency > 200.0 && s.cpu_usage <= 80.0 {
                assert_eq!(s.root_cause, RootCause::NetworkLag, "row {i}");
            }
        }
        for i in 950..=960 {
            let s = table.get(i).unwrap();
            if s.memory_usage > 85.0 && s.cpu_usage <= 80.0 && s.network_latency <= 200.0 {
                assert_eq!(s.root_cause, RootCause::MemoryLeak, "row {i}");
            }
        }
    }

    #[test]
    fn test_label_priority_on_adversarial_rows() {
        // All thresholds fire: High_CPU wins
        assert_eq!(label_for(95.0, 600.0, 99.0), RootCause::HighCpu);
        // Latency and memory fire: Network_Lag wins
        assert_eq!(label_for(30.0, 600.0, 99.0), RootCause::NetworkLag);
        // Only memory fires
        assert_eq!(label_for(30.0, 50.0, 99.0), RootCause::MemoryLeak);
        // Threshold values themselves are not anomalous (strict comparison)
        assert_eq!(label_for(80.0, 200.0, 85.0), RootCause::Normal);
    }
}
