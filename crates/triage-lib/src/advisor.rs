//! Remediation advice for diagnosed root causes

use crate::models::RootCause;

/// Fallback for labels outside the closed cause set
pub const UNKNOWN_ISSUE: &str = "Unknown issue";

/// Recommended action for a diagnosed cause. Pure total lookup.
pub fn recommend(cause: RootCause) -> &'static str {
    match cause {
        RootCause::HighCpu => "Auto-scale CPU cores or kill the offending process.",
        RootCause::NetworkLag => "Reroute traffic via CDN and check firewall rules.",
        RootCause::MemoryLeak => "Restart the application service in safe mode.",
        RootCause::Normal => "System healthy, no action needed.",
    }
}

/// Recommended action for an untyped label string. Labels outside the
/// closed set fall back to [`UNKNOWN_ISSUE`] rather than failing.
pub fn recommend_label(label: &str) -> &'static str {
    RootCause::from_label(label)
        .map(recommend)
        .unwrap_or(UNKNOWN_ISSUE)
}
