//! Probe endpoints.
//!
//! - `/liveness` (`/live`) - answers immediately, never touches storage
//! - `/readiness` (`/ready`) - pings the active store

use axum::{extract::State, http::StatusCode, Json};

use shipping_core::service::ProbeStatus;

use crate::state::AppState;

/// GET /liveness - Basic liveness probe.
pub async fn liveness() -> Json<ProbeStatus> {
    Json(ProbeStatus::live())
}

/// GET /readiness - Readiness probe.
///
/// Returns 200 when the store answers a ping, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ProbeStatus>) {
    match state.packages.ping().await {
        Ok(()) => (StatusCode::OK, Json(ProbeStatus::ready())),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeStatus::unavailable()),
            )
        }
    }
}
