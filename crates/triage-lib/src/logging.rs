//! Run-scoped log collection
//!
//! The collector replaces the original console surface's process-global log
//! state with an explicit object owned by one simulation run. Entries keep
//! the agent's narrative stage tags and are mirrored to `tracing` so the
//! same events show up in structured output.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Narrative stage of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogStage {
    Init,
    Train,
    Success,
    Info,
    Warning,
    Analysis,
    Debug,
    Action,
}

impl LogStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStage::Init => "INIT",
            LogStage::Train => "TRAIN",
            LogStage::Success => "SUCCESS",
            LogStage::Info => "INFO",
            LogStage::Warning => "WARNING",
            LogStage::Analysis => "ANALYSIS",
            LogStage::Debug => "DEBUG",
            LogStage::Action => "ACTION",
        }
    }
}

impl std::fmt::Display for LogStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One collected log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub stage: LogStage,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.stage,
            self.message
        )
    }
}

/// Accumulates log lines for one simulation run
#[derive(Debug, Default)]
pub struct LogCollector {
    entries: Vec<LogEntry>,
}

impl LogCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and mirror it to `tracing`
    pub fn push(&mut self, stage: LogStage, message: impl Into<String>) {
        let message = message.into();
        match stage {
            LogStage::Warning => warn!(stage = %stage, "{message}"),
            LogStage::Debug => debug!(stage = %stage, "{message}"),
            _ => info!(stage = %stage, "{message}"),
        }
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            stage,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries rendered as console lines
    pub fn render(&self) -> String {
        let lines: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_accumulates_in_order() {
        let mut log = LogCollector::new();
        assert!(log.is_empty());

        log.push(LogStage::Init, "Connecting to server telemetry stream...");
        log.push(LogStage::Warning, "Anomaly detected at T-915.");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].stage, LogStage::Init);
        assert_eq!(log.entries()[1].stage, LogStage::Warning);
    }

    #[test]
    fn test_entry_line_format() {
        let mut log = LogCollector::new();
        log.push(LogStage::Analysis, "Root cause identified: High_CPU");

        let line = log.entries()[0].to_string();
        assert!(line.contains("[ANALYSIS]"));
        assert!(line.ends_with("Root cause identified: High_CPU"));
        // [HH:MM:SS] prefix
        assert_eq!(line.as_bytes()[0], b'[');
        assert_eq!(line.as_bytes()[9], b']');
    }

    #[test]
    fn test_render_joins_lines() {
        let mut log = LogCollector::new();
        log.push(LogStage::Init, "one");
        log.push(LogStage::Info, "two");

        let rendered = log.render();
        assert_eq!(rendered.lines().count(), 2);
    }
}
