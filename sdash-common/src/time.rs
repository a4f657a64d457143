//! Timestamp utilities

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// ISO-8601 with millisecond precision and a `Z` suffix (`2024-05-01T09:30:00.000Z`)
pub fn to_iso_millis(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable local date and time, e.g. `5/1/2024, 9:30:00 AM`
pub fn to_local_display(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Compact stamp used in export file names (`2024-05-01T09-30-00`)
pub fn to_file_stamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H-%M-%S").to_string()
}
