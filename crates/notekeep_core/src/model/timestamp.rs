//! Millisecond-precision UTC timestamps.
//!
//! Snapshot files carry timestamps as ISO-8601 strings with exactly three
//! fractional digits (`2024-01-05T09:30:00.000Z`). Values produced in core are
//! truncated to milliseconds so a save/load cycle is lossless.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC instant used for `created_at` / `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Drops sub-millisecond precision.
pub fn truncate_to_millis(value: Timestamp) -> Timestamp {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or(value)
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any RFC 3339 timestamp and normalizes it to UTC milliseconds.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())?;
    Ok(truncate_to_millis(parsed.with_timezone(&Utc)))
}

/// Serde adapter for [`Timestamp`] fields.
pub mod iso_millis {
    use super::{format_timestamp, parse_timestamp, Timestamp};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
