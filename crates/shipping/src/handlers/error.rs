use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shipping_core::package::PackageError;
use shipping_core::service::{unix_timestamp, ServiceInfo};
use shipping_core::storage::{
    repository_error_kind, repository_error_to_status_code, RepositoryError,
};

use crate::state::AppState;

/// What went wrong while serving a request.
#[derive(Debug, Error)]
pub enum ApiErrorKind {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(#[from] PackageError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<JsonRejection> for ApiErrorKind {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiErrorKind {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl ApiErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiErrorKind::BadRequest(_) | ApiErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::Repository(err) => {
                StatusCode::from_u16(repository_error_to_status_code(err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::BadRequest(_) | ApiErrorKind::Validation(_) => "bad_request",
            ApiErrorKind::Repository(err) => repository_error_kind(err),
        }
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: f64,
    pub app_name: String,
    pub version: String,
    pub called_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

/// The handler being served, used to label errors.
#[derive(Debug, Clone)]
pub struct Operation {
    method: &'static str,
    tracking_id: Option<String>,
    service: Arc<ServiceInfo>,
}

impl Operation {
    pub fn new(state: &AppState, method: &'static str) -> Self {
        Self {
            method,
            tracking_id: None,
            service: state.service.clone(),
        }
    }

    /// Attaches the tracking ID the request refers to.
    pub fn for_package(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = Some(tracking_id.into());
        self
    }

    pub fn error(&self, kind: impl Into<ApiErrorKind>) -> ApiError {
        ApiError {
            kind: kind.into(),
            operation: self.clone(),
        }
    }
}

/// Error returned by the package handlers.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    operation: Operation,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    fn body(&self) -> ErrorBody {
        let status = self.status_code();
        let message = if status.is_server_error() {
            format!(
                "An internal error occurred while running {}",
                self.operation.method
            )
        } else {
            self.kind.to_string()
        };

        ErrorBody {
            error: self.kind.error_code().to_string(),
            message,
            timestamp: unix_timestamp(),
            app_name: self.operation.service.name.clone(),
            version: self.operation.service.version.clone(),
            called_method: self.operation.method.to_string(),
            tracking_id: self.operation.tracking_id.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                method = self.operation.method,
                tracking_id = ?self.operation.tracking_id,
                error = %self.kind,
                "Request failed"
            );
        } else {
            tracing::warn!(
                status = %status,
                method = self.operation.method,
                tracking_id = ?self.operation.tracking_id,
                message = %self.kind,
                "API error"
            );
        }

        (status, Json(self.body())).into_response()
    }
}
