use uuid::Uuid;

use super::error::PackageError;

/// Longest tracking ID accepted by the API.
pub const MAX_TRACKING_ID_LEN: usize = 128;

/// Generates a tracking ID for packages created without one.
pub fn generate_tracking_id() -> String {
    Uuid::new_v4().to_string()
}

/// Validates a tracking ID before it is stored or looked up.
///
/// Tracking IDs travel as a single URL path segment, so `/`, whitespace and
/// control characters are rejected.
pub fn validate_tracking_id(tracking_id: &str) -> Result<(), PackageError> {
    if tracking_id.is_empty() {
        return Err(PackageError::EmptyTrackingId);
    }
    if tracking_id.chars().count() > MAX_TRACKING_ID_LEN {
        return Err(PackageError::TrackingIdTooLong);
    }
    if tracking_id
        .chars()
        .any(|c| c == '/' || c.is_whitespace() || c.is_control())
    {
        return Err(PackageError::InvalidTrackingId(tracking_id.to_string()));
    }
    Ok(())
}
