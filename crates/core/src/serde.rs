//! Serde helper functions for request and file deserialization.
//!
//! Blank optional strings coming from clients are treated as absent, and
//! hand-written store files may omit server-assigned timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Default timestamp for records that were stored without one.
pub fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}
