//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use shipping_core::package::{Package, UpdatePackageRequest};
use shipping_core::storage::{PackageRepository, RepositoryError, Result};

use super::conversions::PackageRow;
use super::error::map_sqlx_error;
use super::schema;

/// Package store over a Cloud SQL for PostgreSQL pool.
///
/// Each call borrows one pooled connection for a single auto-committed
/// statement, except partial updates, which lock the row inside a
/// transaction.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Takes ownership of `pool` and creates the table if absent.
    pub async fn new(pool: PgPool) -> Result<Self> {
        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("failed to create schema: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl PackageRepository for PostgresRepository {
    async fn list_packages(&self) -> Result<Vec<Package>> {
        let rows: Vec<PackageRow> = sqlx::query_as(schema::SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ""))?;

        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn get_package(&self, tracking_id: &str) -> Result<Option<Package>> {
        let row: Option<PackageRow> = sqlx::query_as(schema::SELECT_BY_ID)
            .bind(tracking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, tracking_id))?;

        Ok(row.map(Package::from))
    }

    async fn create_package(&self, package: &Package) -> Result<Package> {
        let row: PackageRow = sqlx::query_as(schema::INSERT)
            .bind(&package.tracking_id)
            .bind(&package.contents)
            .bind(&package.status)
            .bind(&package.origin)
            .bind(&package.destination)
            .bind(package.created_at)
            .bind(package.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &package.tracking_id))?;

        tracing::debug!(tracking_id = %row.tracking_id, "Package inserted");
        Ok(row.into())
    }

    async fn replace_package(&self, package: &Package) -> Result<Package> {
        let row: Option<PackageRow> = sqlx::query_as(schema::UPDATE)
            .bind(&package.tracking_id)
            .bind(&package.contents)
            .bind(&package.status)
            .bind(&package.origin)
            .bind(&package.destination)
            .bind(package.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &package.tracking_id))?;

        row.map(Package::from)
            .ok_or_else(|| RepositoryError::package_not_found(&package.tracking_id))
    }

    async fn update_package(
        &self,
        tracking_id: &str,
        update: &UpdatePackageRequest,
    ) -> Result<Package> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, tracking_id))?;

        // Dropping `tx` on any early return rolls it back.
        let current: Option<PackageRow> = sqlx::query_as(schema::SELECT_BY_ID_FOR_UPDATE)
            .bind(tracking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, tracking_id))?;

        let mut package = current
            .map(Package::from)
            .ok_or_else(|| RepositoryError::package_not_found(tracking_id))?;
        update.apply_to(&mut package);

        let row: PackageRow = sqlx::query_as(schema::UPDATE)
            .bind(&package.tracking_id)
            .bind(&package.contents)
            .bind(&package.status)
            .bind(&package.origin)
            .bind(&package.destination)
            .bind(package.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, tracking_id))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, tracking_id))?;

        Ok(row.into())
    }

    async fn delete_package(&self, tracking_id: &str) -> Result<()> {
        let result = sqlx::query(schema::DELETE)
            .bind(tracking_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, tracking_id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::package_not_found(tracking_id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ""))?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
