//! Functional core of the shipping service.
//!
//! Pure data types, validation and the storage contract shared by every
//! backend. Nothing in this crate performs I/O.

pub mod package;
pub mod serde;
pub mod service;
pub mod storage;
