pub mod discovery;
pub mod error;
pub mod health;
pub mod openapi;
pub mod packages;

pub use error::{ApiError, ApiErrorKind, ErrorBody, Operation};
