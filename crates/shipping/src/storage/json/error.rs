//! JSON file error mapping.
//!
//! Maps `std::io::Error` and `serde_json::Error` to `RepositoryError`.

use std::path::Path;

use shipping_core::storage::RepositoryError;

/// Maps an I/O failure on the database file.
pub fn map_io_error(err: &std::io::Error, path: &Path) -> RepositoryError {
    RepositoryError::Unavailable(format!("{}: {err}", path.display()))
}

/// Maps a JSON failure.
///
/// - Syntax, EOF and shape errors while reading -> `Corrupt`
/// - I/O errors surfaced by serde -> `Unavailable`
pub fn map_json_error(err: &serde_json::Error, path: &Path) -> RepositoryError {
    if err.is_io() {
        RepositoryError::Unavailable(format!("{}: {err}", path.display()))
    } else {
        RepositoryError::Corrupt(format!("{}: {err}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_maps_to_corrupt() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let result = map_json_error(&err, Path::new("packages.json"));

        match result {
            RepositoryError::Corrupt(message) => assert!(message.starts_with("packages.json:")),
            other => panic!("Expected Corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_maps_to_unavailable() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let result = map_io_error(&err, Path::new("/data/packages.json"));

        assert!(matches!(result, RepositoryError::Unavailable(_)));
    }
}
