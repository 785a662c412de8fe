//! Shared helpers for HTTP-level integration tests.
//!
//! Tests go through [`build_app_router`] so they exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that production uses.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitework_api::config::ServerConfig;
use sitework_api::router::build_app_router;
use sitework_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
    .expect("request should not fail at the transport level")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

/// Send a PATCH request with a JSON body.
pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PATCH", uri, body).await
}

/// Send a DELETE request.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
    .expect("request should not fail at the transport level")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send_json(app: Router, method: &str, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request"),
    )
    .await
    .expect("request should not fail at the transport level")
}
