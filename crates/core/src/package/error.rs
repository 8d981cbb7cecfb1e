use thiserror::Error;

/// Errors that can occur when validating package input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackageError {
    #[error("Tracking ID cannot be empty")]
    EmptyTrackingId,
    #[error("Tracking ID too long (max 128 characters)")]
    TrackingIdTooLong,
    #[error("Tracking ID contains invalid characters: {0}")]
    InvalidTrackingId(String),
    #[error("Tracking ID in body ({body}) does not match path ({path})")]
    TrackingIdMismatch { path: String, body: String },
}
