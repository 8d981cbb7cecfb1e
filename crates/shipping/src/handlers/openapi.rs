use axum::{http::header, response::IntoResponse};

/// OpenAPI document for every route, compiled into the binary.
pub const OPENAPI_YAML: &str = include_str!("../../openapi.yaml");

/// GET /openapi.yaml
pub async fn openapi_document() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_YAML)
}
