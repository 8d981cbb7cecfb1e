//! API request types for package operations.
//!
//! Pure data types with no I/O. Handlers deserialize these from JSON bodies
//! and turn them into [`Package`] values for the active store.

use serde::{Deserialize, Serialize};

use super::error::PackageError;
use super::operations::{generate_tracking_id, validate_tracking_id};
use super::types::Package;
use crate::serde::deserialize_optional_string;

/// Request payload for creating a package (`POST /packages`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackageRequest {
    /// Client-assigned tracking ID; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    pub contents: String,
    pub status: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
}

impl CreatePackageRequest {
    /// Create a new request with the required fields.
    pub fn new(contents: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            tracking_id: None,
            contents: contents.into(),
            status: status.into(),
            origin: None,
            destination: None,
        }
    }

    /// Set the tracking ID.
    pub fn with_tracking_id(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = Some(tracking_id.into());
        self
    }

    /// Set the origin address.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the destination address.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Convert into a Package, generating a tracking ID if none was given.
    pub fn into_package(self) -> Result<Package, PackageError> {
        let tracking_id = match self.tracking_id {
            Some(id) => {
                validate_tracking_id(&id)?;
                id
            }
            None => generate_tracking_id(),
        };

        let mut package = Package::new(tracking_id, self.contents, self.status);
        package.origin = self.origin;
        package.destination = self.destination;
        Ok(package)
    }
}

/// Request payload for replacing a package (`PUT /packages/{id}`).
///
/// Carries the same fields as a create; the tracking ID comes from the path
/// and may only be repeated in the body if it matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacePackageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    pub contents: String,
    pub status: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
}

impl ReplacePackageRequest {
    /// Convert into the replacement Package for `tracking_id`.
    ///
    /// The path ID names an existing record and is not re-validated; unknown
    /// IDs are left to the store. Both timestamps are set to now; stores keep
    /// the original `created_at`.
    pub fn into_package(self, tracking_id: &str) -> Result<Package, PackageError> {
        check_body_id(tracking_id, self.tracking_id.as_deref())?;

        let mut package = Package::new(tracking_id, self.contents, self.status);
        package.origin = self.origin;
        package.destination = self.destination;
        Ok(package)
    }
}

/// Request payload for a partial update (`PATCH /packages/{id}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePackageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
}

impl UpdatePackageRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contents.
    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the origin address.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the destination address.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Checks that a tracking ID repeated in the body matches `tracking_id`.
    pub fn validate_for(&self, tracking_id: &str) -> Result<(), PackageError> {
        check_body_id(tracking_id, self.tracking_id.as_deref())
    }

    /// Apply updates to an existing package and refresh `updated_at`.
    pub fn apply_to(&self, package: &mut Package) {
        if let Some(contents) = &self.contents {
            package.contents = contents.clone();
        }
        if let Some(status) = &self.status {
            package.status = status.clone();
        }
        if let Some(origin) = &self.origin {
            package.origin = Some(origin.clone());
        }
        if let Some(destination) = &self.destination {
            package.destination = Some(destination.clone());
        }
        package.touch();
    }
}

fn check_body_id(path: &str, body: Option<&str>) -> Result<(), PackageError> {
    match body {
        Some(body) if body != path => Err(PackageError::TrackingIdMismatch {
            path: path.to_string(),
            body: body.to_string(),
        }),
        _ => Ok(()),
    }
}
