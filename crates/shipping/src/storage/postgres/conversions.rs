use chrono::{DateTime, Utc};
use sqlx::FromRow;

use shipping_core::package::Package;

/// A row of the `packages` table.
#[derive(Debug, Clone, FromRow)]
pub struct PackageRow {
    pub tracking_id: String,
    pub contents: String,
    pub status: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            tracking_id: row.tracking_id,
            contents: row.contents,
            status: row.status,
            origin: row.origin,
            destination: row.destination,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
