//! PostgreSQL error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `shipping_core::storage`.
//! Database errors are classified by SQLSTATE.

use shipping_core::storage::RepositoryError;

/// Maps a sqlx error raised while working on `tracking_id`.
///
/// # Error Mapping
///
/// - Database errors -> see [`classify_sqlstate`]
/// - `RowNotFound` -> `RepositoryError::NotFound`
/// - Pool, I/O and TLS failures -> `RepositoryError::Unavailable`
/// - Decode failures -> `RepositoryError::Corrupt`
/// - All other errors -> `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, tracking_id: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => classify_sqlstate(&code, tracking_id, db_err.message()),
            None => RepositoryError::QueryFailed(db_err.message().to_string()),
        },
        sqlx::Error::RowNotFound => RepositoryError::package_not_found(tracking_id),
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => RepositoryError::Unavailable(err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => RepositoryError::Corrupt(err.to_string()),
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a PostgreSQL SQLSTATE code.
///
/// - `23505` unique violation -> `AlreadyExists`
/// - class `22` data exception, `23502` not-null, `23514` check -> `InvalidData`
/// - class `08` connection exception, `57P0x` shutdown -> `Unavailable`
/// - anything else -> `QueryFailed`
pub fn classify_sqlstate(code: &str, tracking_id: &str, message: &str) -> RepositoryError {
    match code {
        "23505" => RepositoryError::package_exists(tracking_id),
        "23502" | "23514" => RepositoryError::InvalidData(message.to_string()),
        c if c.starts_with("22") => RepositoryError::InvalidData(message.to_string()),
        c if c.starts_with("08") || c.starts_with("57P0") => {
            RepositoryError::Unavailable(message.to_string())
        }
        _ => RepositoryError::QueryFailed(format!("{message} (SQLSTATE {code})")),
    }
}
