/// Utility functions for value rounding and time formatting
use std::time::Duration;
use time::{format_description, OffsetDateTime};

/// Round a value to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format the capture time of a reading as HH:MM:SS
///
/// Uses the local offset when it can be determined and falls back to UTC.
/// Falls back to the default string representation if formatting fails.
pub fn format_capture_time(dt: &OffsetDateTime) -> String {
    match format_description::parse("[hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// Current wall-clock time, local if available
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Human-readable duration for log lines, e.g. "5m", "90s", "1m 30s"
pub fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match (secs / 60, secs % 60) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m {}s", m, s),
    }
}
