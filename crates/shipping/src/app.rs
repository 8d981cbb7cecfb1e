use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        discovery::discovery,
        health::{liveness, readiness},
        openapi::openapi_document,
        packages::{
            create_package, delete_package, get_package, list_packages, replace_package,
            update_package,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    // Package routes with CORS
    let package_routes = Router::new()
        .route("/packages", get(list_packages).post(create_package))
        .route(
            "/packages/{id}",
            get(get_package)
                .put(replace_package)
                .patch(update_package)
                .delete(delete_package),
        )
        .layer(cors);

    Router::new()
        .merge(package_routes)
        .route("/discovery", get(discovery))
        .route("/liveness", get(liveness))
        .route("/live", get(liveness))
        .route("/readiness", get(readiness))
        .route("/ready", get(readiness))
        .route("/openapi.yaml", get(openapi_document))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, Response},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use shipping_core::package::{Package, UpdatePackageRequest};
    use shipping_core::storage::{PackageRepository, Result as StoreResult};

    use crate::handlers::ErrorBody;
    use crate::storage::JsonFileRepository;

    /// Store that takes a full second to list anything.
    struct SlowStore;

    #[async_trait]
    impl PackageRepository for SlowStore {
        async fn list_packages(&self) -> StoreResult<Vec<Package>> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(Vec::new())
        }
        async fn get_package(&self, _: &str) -> StoreResult<Option<Package>> {
            Ok(None)
        }
        async fn create_package(&self, package: &Package) -> StoreResult<Package> {
            Ok(package.clone())
        }
        async fn replace_package(&self, package: &Package) -> StoreResult<Package> {
            Ok(package.clone())
        }
        async fn update_package(
            &self,
            tracking_id: &str,
            _: &UpdatePackageRequest,
        ) -> StoreResult<Package> {
            Ok(Package::new(tracking_id, "books", "placed"))
        }
        async fn delete_package(&self, _: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    fn setup() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("packages.json"));
        (dir, create_app(AppState::new(Arc::new(repo))))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(app: &Router, body: Value) -> Response<Body> {
        app.clone()
            .oneshot(json_request("POST", "/packages", body))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_package_lifecycle() {
        let (_dir, app) = setup();

        let response = create(
            &app,
            json!({"tracking_id": "T1", "contents": "books", "status": "placed"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = body_json(response).await;
        assert_eq!(created["tracking_id"], "T1");
        assert_eq!(created["contents"], "books");
        assert_eq!(created["status"], "placed");

        let response = app.clone().oneshot(get_request("/packages/T1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Value = body_json(response).await;
        assert_eq!(fetched, created);

        let response = app
            .clone()
            .oneshot(delete_request("/packages/T1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());

        let response = app.oneshot(get_request("/packages/T1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.error, "not_found");
        assert_eq!(error.called_method, "get_package");
        assert_eq!(error.tracking_id.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_create_generates_tracking_id() {
        let (_dir, app) = setup();

        let response = create(
            &app,
            json!({"contents": "books", "status": "placed", "destination": "Lisbon"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created: Value = body_json(response).await;
        let id = created["tracking_id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(created["destination"], "Lisbon");

        let response = app
            .oneshot(get_request(&format!("/packages/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let (_dir, app) = setup();
        create(
            &app,
            json!({"tracking_id": "T1", "contents": "books", "status": "placed"}),
        )
        .await;

        let response = create(
            &app,
            json!({"tracking_id": "T1", "contents": "vinyl", "status": "delivered"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.error, "conflict");
        assert_eq!(error.called_method, "create_package");

        let response = app.oneshot(get_request("/packages/T1")).await.unwrap();
        let stored: Value = body_json(response).await;
        assert_eq!(stored["contents"], "books");
        assert_eq!(stored["status"], "placed");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_bodies() {
        let (_dir, app) = setup();

        let missing_status = create(&app, json!({"tracking_id": "T1", "contents": "books"})).await;
        assert_eq!(missing_status.status(), StatusCode::BAD_REQUEST);
        let error: ErrorBody = body_json(missing_status).await;
        assert_eq!(error.error, "bad_request");

        let wrong_type = create(&app, json!({"contents": 7, "status": "placed"})).await;
        assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);

        let bad_id = create(
            &app,
            json!({"tracking_id": "a/b", "contents": "books", "status": "placed"}),
        )
        .await;
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

        let not_json = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/packages")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);

        let no_content_type = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/packages")
                    .body(Body::from(r#"{"contents": "books", "status": "placed"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(no_content_type.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(get_request("/packages")).await.unwrap();
        let packages: Vec<Value> = body_json(response).await;
        assert!(packages.is_empty());
    }

    #[tokio::test]
    async fn test_replace_package() {
        let (_dir, app) = setup();
        let created: Value = body_json(
            create(
                &app,
                json!({"tracking_id": "T1", "contents": "books", "status": "placed", "origin": "Montevideo"}),
            )
            .await,
        )
        .await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/packages/T1",
                json!({"contents": "vinyl", "status": "in-transit"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let replaced: Value = body_json(response).await;
        assert_eq!(replaced["contents"], "vinyl");
        assert_eq!(replaced["status"], "in-transit");
        assert!(replaced.get("origin").is_none());
        assert_eq!(replaced["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn test_replace_unknown_creates_nothing() {
        let (_dir, app) = setup();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/packages/T9",
                json!({"contents": "vinyl", "status": "placed"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.called_method, "update_package");

        let response = app.oneshot(get_request("/packages/T9")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_replace_rejects_mismatched_id() {
        let (_dir, app) = setup();
        create(
            &app,
            json!({"tracking_id": "T1", "contents": "books", "status": "placed"}),
        )
        .await;

        let response = app
            .oneshot(json_request(
                "PUT",
                "/packages/T1",
                json!({"tracking_id": "T2", "contents": "vinyl", "status": "placed"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_updates_given_fields() {
        let (_dir, app) = setup();
        let created: Value = body_json(
            create(
                &app,
                json!({"tracking_id": "T1", "contents": "books", "status": "placed", "origin": "Montevideo"}),
            )
            .await,
        )
        .await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/packages/T1",
                json!({"status": "delivered"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated: Value = body_json(response).await;
        assert_eq!(updated["status"], "delivered");
        assert_eq!(updated["contents"], "books");
        assert_eq!(updated["origin"], "Montevideo");
        assert_eq!(updated["created_at"], created["created_at"]);

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/packages/T9",
                json!({"status": "delivered"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let (_dir, app) = setup();

        let response = app.oneshot(delete_request("/packages/T1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.called_method, "delete_package");
    }

    #[tokio::test]
    async fn test_list_after_creates_and_deletes() {
        let (_dir, app) = setup();

        for i in 0..5 {
            let response = create(
                &app,
                json!({"tracking_id": format!("T{i}"), "contents": "books", "status": "placed"}),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }
        for i in [1, 3] {
            let response = app
                .clone()
                .oneshot(delete_request(&format!("/packages/T{i}")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }

        let response = app.oneshot(get_request("/packages")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let packages: Vec<Value> = body_json(response).await;
        let ids: Vec<_> = packages
            .iter()
            .map(|p| p["tracking_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["T0", "T2", "T4"]);
    }

    #[tokio::test]
    async fn test_corrupt_store_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let app = create_app(AppState::new(Arc::new(JsonFileRepository::new(path))));

        let response = app.clone().oneshot(get_request("/packages")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.error, "storage_corrupt");
        assert_eq!(error.called_method, "list_packages");
        assert!(error.tracking_id.is_none());

        let response = app.oneshot(get_request("/readiness")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let probe: Value = body_json(response).await;
        assert_eq!(probe["status"], "unavailable");
        assert_eq!(probe["code"], 503);
    }

    #[tokio::test]
    async fn test_probes() {
        let (_dir, app) = setup();

        for uri in ["/liveness", "/live"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let probe: Value = body_json(response).await;
            assert_eq!(probe["status"], "live");
            assert_eq!(probe["code"], 200);
            assert!(probe["timestamp"].as_f64().unwrap() > 0.0);
        }

        for uri in ["/readiness", "/ready"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let probe: Value = body_json(response).await;
            assert_eq!(probe["status"], "ready");
        }
    }

    #[tokio::test]
    async fn test_discovery() {
        let (_dir, app) = setup();

        let response = app.oneshot(get_request("/discovery")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let info: Value = body_json(response).await;
        assert_eq!(info["name"], "shipping");
        assert_eq!(info["version"], "1.0");
        assert_eq!(info["team"], "genAIs");
        assert_eq!(info["organization"], "acme");
        assert_eq!(info["owners"], json!(["ameerabb", "lonestar"]));
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (_dir, app) = setup();

        let response = app.oneshot(get_request("/openapi.yaml")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/yaml"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("openapi: 3"));
        assert!(text.contains("/packages/{tracking_id}:"));
        assert!(text.contains("operationId: patch_package"));
    }

    #[tokio::test]
    async fn test_unknown_path_ids_are_not_found() {
        let (_dir, app) = setup();
        let long_id = "x".repeat(129);

        for uri in [format!("/packages/{long_id}"), "/packages/A%20B".to_string()] {
            let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {uri}");
            let error: ErrorBody = body_json(response).await;
            assert_eq!(error.error, "not_found");

            let response = app.clone().oneshot(delete_request(&uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "DELETE {uri}");
            let error: ErrorBody = body_json(response).await;
            assert_eq!(error.called_method, "delete_package");
        }

        let response = app
            .oneshot(get_request("/packages/A%20B"))
            .await
            .unwrap();
        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.tracking_id.as_deref(), Some("A B"));
    }

    #[tokio::test]
    async fn test_hand_written_ids_stay_reachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages.json");
        std::fs::write(&path, r#"{"A B": {"contents": "letters", "status": "placed"}}"#).unwrap();
        let app = create_app(AppState::new(Arc::new(JsonFileRepository::new(path))));

        let response = app
            .clone()
            .oneshot(get_request("/packages/A%20B"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let package: Value = body_json(response).await;
        assert_eq!(package["tracking_id"], "A B");

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/packages/A%20B",
                json!({"status": "in-transit"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/packages/A%20B",
                json!({"contents": "parcels", "status": "delivered"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(delete_request("/packages/A%20B"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_json_bad_request() {
        let (_dir, app) = setup();

        let response = app.oneshot(get_request("/packages/%FF")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let error: ErrorBody = body_json(response).await;
        assert_eq!(error.error, "bad_request");
        assert_eq!(error.called_method, "get_package");
        assert!(error.tracking_id.is_none());
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let state = AppState::new(Arc::new(SlowStore))
            .with_request_timeout(Duration::from_millis(50));
        let app = create_app(state);

        let response = app.oneshot(get_request("/packages")).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
