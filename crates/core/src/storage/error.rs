use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage corrupt: {0}")]
    Corrupt(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing package.
    pub fn package_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Package",
            id: id.into(),
        }
    }

    /// Shorthand for a duplicate package.
    pub fn package_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: "Package",
            id: id.into(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
