//! Cloud SQL for PostgreSQL storage backend.
//!
//! Rows are mapped to [`shipping_core::package::Package`] through
//! `sqlx::FromRow`. The pool is built once by [`connector::connect`] and owned
//! by [`PostgresRepository`].

pub mod connector;
mod conversions;
mod error;
mod repository;
mod schema;

pub use connector::{connect, connect_options};
pub use repository::PostgresRepository;
