//! Pure functions for mapping repository errors to HTTP responses.
//!
//! Status codes follow the responses declared in the service's OpenAPI
//! document: storage failures of any kind surface as 500.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `InvalidData` -> 400 (Bad Request)
/// - `Unavailable` -> 500 (Internal Server Error)
/// - `Corrupt` -> 500 (Internal Server Error)
/// - `QueryFailed` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use shipping_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::package_not_found("T1");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::Unavailable(_) => 500,
        RepositoryError::Corrupt(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
    }
}

/// Maps a [`RepositoryError`] to the machine-readable `error` field of an
/// API error body.
pub fn repository_error_kind(error: &RepositoryError) -> &'static str {
    match error {
        RepositoryError::NotFound { .. } => "not_found",
        RepositoryError::AlreadyExists { .. } => "conflict",
        RepositoryError::InvalidData(_) => "bad_request",
        RepositoryError::Unavailable(_) => "storage_unavailable",
        RepositoryError::Corrupt(_) => "storage_corrupt",
        RepositoryError::QueryFailed(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::package_not_found("T1");
        assert_eq!(repository_error_to_status_code(&error), 404);
        assert_eq!(repository_error_kind(&error), "not_found");
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::package_exists("T1");
        assert_eq!(repository_error_to_status_code(&error), 409);
        assert_eq!(repository_error_kind(&error), "conflict");
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = RepositoryError::InvalidData("value too long".to_string());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_storage_failures_map_to_500() {
        for error in [
            RepositoryError::Unavailable("connection refused".to_string()),
            RepositoryError::Corrupt("trailing characters".to_string()),
            RepositoryError::QueryFailed("deadlock detected".to_string()),
        ] {
            assert_eq!(repository_error_to_status_code(&error), 500);
        }
    }

    #[test]
    fn test_storage_kinds_are_distinct() {
        assert_eq!(
            repository_error_kind(&RepositoryError::Unavailable(String::new())),
            "storage_unavailable"
        );
        assert_eq!(
            repository_error_kind(&RepositoryError::Corrupt(String::new())),
            "storage_corrupt"
        );
    }
}
