use async_trait::async_trait;

use crate::package::{Package, UpdatePackageRequest};

use super::Result;

/// Repository for package operations.
///
/// Implemented once per storage backend; the HTTP layer only ever sees
/// `Arc<dyn PackageRepository>`.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Lists every stored package, ordered by tracking ID.
    async fn list_packages(&self) -> Result<Vec<Package>>;

    /// Gets a package by its tracking ID.
    async fn get_package(&self, tracking_id: &str) -> Result<Option<Package>>;

    /// Creates a new package. Fails with `AlreadyExists` on a duplicate ID.
    async fn create_package(&self, package: &Package) -> Result<Package>;

    /// Replaces an existing package, keeping its original `created_at`.
    /// Fails with `NotFound` and creates nothing if the ID is unknown.
    async fn replace_package(&self, package: &Package) -> Result<Package>;

    /// Applies a partial update to an existing package.
    async fn update_package(
        &self,
        tracking_id: &str,
        update: &UpdatePackageRequest,
    ) -> Result<Package>;

    /// Deletes a package by its tracking ID.
    async fn delete_package(&self, tracking_id: &str) -> Result<()>;

    /// Checks that the backing storage is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Releases any resources held by the backend.
    async fn close(&self) {}
}
