//! PostgreSQL schema definition and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the packages table.
pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS packages (
    tracking_id TEXT PRIMARY KEY,
    contents TEXT NOT NULL,
    status TEXT NOT NULL,
    origin TEXT,
    destination TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

pub const SELECT_ALL: &str = r#"
SELECT tracking_id, contents, status, origin, destination, created_at, updated_at
FROM packages
ORDER BY tracking_id
"#;

pub const SELECT_BY_ID: &str = r#"
SELECT tracking_id, contents, status, origin, destination, created_at, updated_at
FROM packages
WHERE tracking_id = $1
"#;

/// Locks the row until the surrounding transaction ends.
pub const SELECT_BY_ID_FOR_UPDATE: &str = r#"
SELECT tracking_id, contents, status, origin, destination, created_at, updated_at
FROM packages
WHERE tracking_id = $1
FOR UPDATE
"#;

pub const INSERT: &str = r#"
INSERT INTO packages (tracking_id, contents, status, origin, destination, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5, $6, $7)
RETURNING tracking_id, contents, status, origin, destination, created_at, updated_at
"#;

/// Overwrites every mutable column; `created_at` is left untouched.
pub const UPDATE: &str = r#"
UPDATE packages
SET contents = $2, status = $3, origin = $4, destination = $5, updated_at = $6
WHERE tracking_id = $1
RETURNING tracking_id, contents, status, origin, destination, created_at, updated_at
"#;

pub const DELETE: &str = "DELETE FROM packages WHERE tracking_id = $1";

pub const PING: &str = "SELECT 1";
