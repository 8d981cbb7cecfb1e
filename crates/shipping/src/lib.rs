//! Package tracking HTTP service.
//!
//! The router in [`app`] talks to whichever
//! [`PackageRepository`](shipping_core::storage::PackageRepository) the entry
//! point installs in [`state::AppState`].

pub mod app;
pub mod config;
pub mod handlers;
pub mod server;
pub mod state;
pub mod storage;
