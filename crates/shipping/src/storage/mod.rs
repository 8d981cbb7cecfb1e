//! Storage backend implementations.
//!
//! Concrete implementations of [`shipping_core::storage::PackageRepository`].
//! Each backend sits behind its own feature flag and is picked at startup by
//! the matching binary.
//!
//! # Feature Flags
//!
//! - `json` (default): a single JSON file on local disk
//! - `cloudsql` (default): Cloud SQL for PostgreSQL through `sqlx`
//!
//! Build only the JSON backend:
//! ```bash
//! cargo build -p shipping --no-default-features --features json
//! ```

#[cfg(not(any(feature = "json", feature = "cloudsql")))]
compile_error!(
    "No storage backend selected. Enable 'json' or 'cloudsql' feature. \
    Example: cargo build -p shipping --features json"
);

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "cloudsql")]
pub mod postgres;

#[cfg(feature = "json")]
pub use json::JsonFileRepository;

#[cfg(feature = "cloudsql")]
pub use postgres::PostgresRepository;
