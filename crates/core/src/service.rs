//! Service metadata exposed by the discovery and probe endpoints.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Description of the service returned by `GET /discovery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub owners: Vec<String>,
    pub team: String,
    pub organization: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "shipping".to_string(),
            version: "1.0".to_string(),
            owners: vec!["ameerabb".to_string(), "lonestar".to_string()],
            team: "genAIs".to_string(),
            organization: "acme".to_string(),
        }
    }
}

/// Body of the liveness and readiness probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeStatus {
    pub status: String,
    pub code: u16,
    /// Seconds since the Unix epoch, with sub-second precision.
    pub timestamp: f64,
}

impl ProbeStatus {
    /// Creates a probe body stamped with the current time.
    pub fn new(status: impl Into<String>, code: u16) -> Self {
        Self {
            status: status.into(),
            code,
            timestamp: unix_timestamp(),
        }
    }

    pub fn live() -> Self {
        Self::new("live", 200)
    }

    pub fn ready() -> Self {
        Self::new("ready", 200)
    }

    pub fn unavailable() -> Self {
        Self::new("unavailable", 503)
    }
}

/// Current time as fractional seconds since the Unix epoch.
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
