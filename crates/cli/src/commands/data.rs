//! Inspect the generated telemetry table

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use triage_lib::{telemetry, ColumnStats, Metric, RootCause, TelemetryTable};

use crate::output::{format_value, print_heading, print_table, OutputFormat};

/// Row for the per-metric summary table
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

/// Row for the label distribution table
#[derive(Tabled)]
struct CauseRow {
    #[tabled(rename = "Root Cause")]
    cause: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
}

#[derive(Serialize)]
struct MetricSummary {
    metric: &'static str,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

#[derive(Serialize)]
struct CauseSummary {
    cause: &'static str,
    rows: usize,
}

/// JSON payload for `--format json`
#[derive(Serialize)]
struct DataOutput {
    rows: usize,
    metrics: Vec<MetricSummary>,
    causes: Vec<CauseSummary>,
}

pub fn show_data(samples: usize, seed: u64, format: OutputFormat) -> Result<()> {
    let table = telemetry::generate(samples, seed)?;
    let stats = ColumnStats::compute(&table);

    let metrics: Vec<MetricSummary> = Metric::ALL
        .iter()
        .enumerate()
        .map(|(column, metric)| {
            let (min, max) = column_range(&table, *metric);
            MetricSummary {
                metric: metric.as_str(),
                mean: stats.mean(column),
                std_dev: stats.std_dev(column),
                min,
                max,
            }
        })
        .collect();

    let causes: Vec<CauseSummary> = [
        RootCause::Normal,
        RootCause::HighCpu,
        RootCause::NetworkLag,
        RootCause::MemoryLeak,
    ]
    .iter()
    .map(|cause| CauseSummary {
        cause: cause.label(),
        rows: table
            .samples()
            .iter()
            .filter(|s| s.root_cause == *cause)
            .count(),
    })
    .collect();

    match format {
        OutputFormat::Json => {
            let output = DataOutput {
                rows: table.len(),
                metrics,
                causes,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_heading(&format!("Telemetry ({} rows)", table.len()));
            let rows: Vec<MetricRow> = metrics
                .iter()
                .map(|m| MetricRow {
                    metric: m.metric,
                    mean: format_value(m.mean),
                    std_dev: format_value(m.std_dev),
                    min: format_value(m.min),
                    max: format_value(m.max),
                })
                .collect();
            print_table(&rows);

            print_heading("Label Distribution");
            let rows: Vec<CauseRow> = causes
                .iter()
                .map(|c| CauseRow {
                    cause: c.cause,
                    rows: c.rows,
                })
                .collect();
            print_table(&rows);
        }
    }

    Ok(())
}

fn column_range(table: &TelemetryTable, metric: Metric) -> (f64, f64) {
    table
        .samples()
        .iter()
        .map(|s| s.metric(metric))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |acc, v| {
            (acc.0.min(v), acc.1.max(v))
        })
}
