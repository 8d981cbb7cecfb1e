use axum::{extract::State, Json};

use shipping_core::service::ServiceInfo;

use crate::state::AppState;

/// GET /discovery - Service name, version and ownership.
pub async fn discovery(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.service.as_ref().clone())
}
