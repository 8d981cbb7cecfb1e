use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use shipping_core::package::{
    CreatePackageRequest, Package, ReplacePackageRequest, UpdatePackageRequest,
};
use shipping_core::storage::RepositoryError;

use super::error::{ApiError, Operation};
use crate::state::AppState;

/// Extracts the tracking ID from the path and labels `op` with it.
///
/// Path IDs only look up existing records, so they are not validated here;
/// an ID the store does not know answers 404.
fn tracking_id_from(
    path: Result<Path<String>, PathRejection>,
    op: Operation,
) -> Result<(String, Operation), ApiError> {
    let Path(tracking_id) = path.map_err(|e| op.error(e))?;
    let op = op.for_package(&tracking_id);
    Ok((tracking_id, op))
}

/// List all packages (GET /packages).
pub async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<Package>>, ApiError> {
    let op = Operation::new(&state, "list_packages");

    let packages = state
        .packages
        .list_packages()
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(packages))
}

/// Create a new package (POST /packages).
pub async fn create_package(
    State(state): State<AppState>,
    payload: Result<Json<CreatePackageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut op = Operation::new(&state, "create_package");

    let Json(payload) = payload.map_err(|e| op.error(e))?;
    if let Some(id) = &payload.tracking_id {
        op = op.for_package(id.clone());
    }

    let package = payload.into_package().map_err(|e| op.error(e))?;
    let created = state
        .packages
        .create_package(&package)
        .await
        .map_err(|e| op.error(e))?;

    tracing::info!(tracking_id = %created.tracking_id, status = %created.status, "Created package");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a single package (GET /packages/{id}).
pub async fn get_package(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Package>, ApiError> {
    let (tracking_id, op) = tracking_id_from(path, Operation::new(&state, "get_package"))?;

    state
        .packages
        .get_package(&tracking_id)
        .await
        .map_err(|e| op.error(e))?
        .map(Json)
        .ok_or_else(|| op.error(RepositoryError::package_not_found(&tracking_id)))
}

/// Replace a package (PUT /packages/{id}).
///
/// Never creates a record; unknown IDs answer 404.
pub async fn replace_package(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ReplacePackageRequest>, JsonRejection>,
) -> Result<Json<Package>, ApiError> {
    let (tracking_id, op) = tracking_id_from(path, Operation::new(&state, "update_package"))?;

    let Json(payload) = payload.map_err(|e| op.error(e))?;
    let package = payload
        .into_package(&tracking_id)
        .map_err(|e| op.error(e))?;

    let replaced = state
        .packages
        .replace_package(&package)
        .await
        .map_err(|e| op.error(e))?;

    tracing::info!(tracking_id = %tracking_id, "Replaced package");

    Ok(Json(replaced))
}

/// Apply a partial update (PATCH /packages/{id}).
pub async fn update_package(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdatePackageRequest>, JsonRejection>,
) -> Result<Json<Package>, ApiError> {
    let (tracking_id, op) = tracking_id_from(path, Operation::new(&state, "patch_package"))?;

    let Json(update) = payload.map_err(|e| op.error(e))?;
    update.validate_for(&tracking_id).map_err(|e| op.error(e))?;

    let updated = state
        .packages
        .update_package(&tracking_id, &update)
        .await
        .map_err(|e| op.error(e))?;

    tracing::info!(tracking_id = %tracking_id, "Updated package");

    Ok(Json(updated))
}

/// Delete a package (DELETE /packages/{id}).
pub async fn delete_package(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let (tracking_id, op) = tracking_id_from(path, Operation::new(&state, "delete_package"))?;

    state
        .packages
        .delete_package(&tracking_id)
        .await
        .map_err(|e| op.error(e))?;

    tracing::info!(tracking_id = %tracking_id, "Deleted package");

    Ok(StatusCode::NO_CONTENT)
}
