//! JSON file repository implementation.
//!
//! Implements [`PackageRepository`] over a single JSON document on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use shipping_core::package::{Package, UpdatePackageRequest};
use shipping_core::storage::{PackageRepository, RepositoryError, Result};

use super::error::{map_io_error, map_json_error};
use super::record::PackageRecord;

type Packages = BTreeMap<String, PackageRecord>;

/// File-backed package store.
///
/// Every operation loads the file, and every mutation writes the complete
/// mapping to a sibling temporary file before renaming it into place. The
/// mutex serialises load/modify/save cycles within this process; other
/// processes writing the same file are not coordinated with.
pub struct JsonFileRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Creates a store over `path`. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole database. A missing or blank file is an empty one.
    async fn load(&self) -> Result<Packages> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Packages::new()),
            Err(e) => return Err(map_io_error(&e, &self.path)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Packages::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| map_json_error(&e, &self.path))
    }

    /// Writes the whole database through a temporary file and a rename.
    async fn save(&self, packages: &Packages) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(&e, parent))?;
        }

        let bytes = serde_json::to_vec_pretty(packages)
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes)
            .await
            .map_err(|e| map_io_error(&e, &temp_path))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| map_io_error(&e, &self.path))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "packages.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PackageRepository for JsonFileRepository {
    async fn list_packages(&self) -> Result<Vec<Package>> {
        let _guard = self.lock.lock().await;
        let packages = self.load().await?;

        Ok(packages
            .into_iter()
            .map(|(id, record)| record.into_package(id))
            .collect())
    }

    async fn get_package(&self, tracking_id: &str) -> Result<Option<Package>> {
        let _guard = self.lock.lock().await;
        let mut packages = self.load().await?;

        Ok(packages
            .remove(tracking_id)
            .map(|record| record.into_package(tracking_id)))
    }

    async fn create_package(&self, package: &Package) -> Result<Package> {
        let _guard = self.lock.lock().await;
        let mut packages = self.load().await?;

        if packages.contains_key(&package.tracking_id) {
            return Err(RepositoryError::package_exists(&package.tracking_id));
        }

        packages.insert(package.tracking_id.clone(), PackageRecord::from(package));
        self.save(&packages).await?;

        tracing::debug!(tracking_id = %package.tracking_id, path = %self.path.display(), "Package written");
        Ok(package.clone())
    }

    async fn replace_package(&self, package: &Package) -> Result<Package> {
        let _guard = self.lock.lock().await;
        let mut packages = self.load().await?;

        let existing = packages
            .get(&package.tracking_id)
            .ok_or_else(|| RepositoryError::package_not_found(&package.tracking_id))?;

        let replaced = package
            .clone()
            .with_timestamps(existing.created_at, package.updated_at);

        packages.insert(replaced.tracking_id.clone(), PackageRecord::from(&replaced));
        self.save(&packages).await?;

        Ok(replaced)
    }

    async fn update_package(
        &self,
        tracking_id: &str,
        update: &UpdatePackageRequest,
    ) -> Result<Package> {
        let _guard = self.lock.lock().await;
        let mut packages = self.load().await?;

        let mut package = packages
            .get(tracking_id)
            .cloned()
            .map(|record| record.into_package(tracking_id))
            .ok_or_else(|| RepositoryError::package_not_found(tracking_id))?;

        update.apply_to(&mut package);

        packages.insert(package.tracking_id.clone(), PackageRecord::from(&package));
        self.save(&packages).await?;

        Ok(package)
    }

    async fn delete_package(&self, tracking_id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut packages = self.load().await?;

        if packages.remove(tracking_id).is_none() {
            return Err(RepositoryError::package_not_found(tracking_id));
        }

        self.save(&packages).await
    }

    async fn ping(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.load().await.map(|_| ())
    }
}
