//! On-disk shape of a package.
//!
//! The tracking ID is the map key, so records carry every other field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipping_core::package::Package;
use shipping_core::serde::unix_epoch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub contents: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default = "unix_epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "unix_epoch")]
    pub updated_at: DateTime<Utc>,
}

impl PackageRecord {
    pub fn into_package(self, tracking_id: impl Into<String>) -> Package {
        Package {
            tracking_id: tracking_id.into(),
            contents: self.contents,
            status: self.status,
            origin: self.origin,
            destination: self.destination,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Package> for PackageRecord {
    fn from(package: &Package) -> Self {
        Self {
            contents: package.contents.clone(),
            status: package.status.clone(),
            origin: package.origin.clone(),
            destination: package.destination.clone(),
            created_at: package.created_at,
            updated_at: package.updated_at,
        }
    }
}
