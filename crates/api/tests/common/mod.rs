#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wheelbot_api::config::ServerConfig;
use wheelbot_api::router::build_app_router;
use wheelbot_api::state::AppState;
use wheelbot_broker::{AlpacaClient, AlpacaConfig};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// A broker client that never touches the network (orders are simulated).
pub fn offline_broker() -> Arc<AlpacaClient> {
    let config = AlpacaConfig {
        key_id: "test-key".into(),
        secret_key: "test-secret".into(),
        base_url: "http://127.0.0.1:1".into(),
    };
    Arc::new(AlpacaClient::new(config).expect("client builds"))
}

/// Build the full application router, with or without a broker.
pub fn build_test_app(broker: Option<Arc<AlpacaClient>>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        broker,
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<String>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
