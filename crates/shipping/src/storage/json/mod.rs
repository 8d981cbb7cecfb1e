//! JSON file storage backend.
//!
//! The whole database is one JSON object mapping tracking IDs to package
//! records. It is reloaded on every operation and rewritten atomically after
//! every mutation.

mod error;
mod record;
mod repository;

pub use repository::JsonFileRepository;
