//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use triage_lib::RootCause;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a rounded table from a list of rows
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("{}", "No items found".yellow());
        return;
    }
    let table = Table::new(items).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a section heading
pub fn print_heading(message: &str) {
    println!("\n{}", message.bold());
}

/// Format a metric reading with two decimals
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

/// Color an anomaly verdict
pub fn color_verdict(anomaly: bool) -> String {
    if anomaly {
        "ANOMALY".red().bold().to_string()
    } else {
        "NORMAL".green().to_string()
    }
}

/// Color a root-cause label
pub fn color_cause(cause: RootCause) -> String {
    match cause {
        RootCause::Normal => cause.label().green().to_string(),
        RootCause::HighCpu => cause.label().red().to_string(),
        RootCause::NetworkLag => cause.label().yellow().to_string(),
        RootCause::MemoryLeak => cause.label().magenta().to_string(),
    }
}
