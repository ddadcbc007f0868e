#![allow(dead_code)]

//! Test infrastructure for gateway-service tests

use gateway_service::{AppState, build_router};

use ms_auth::TokenCodec;
use ms_config::GatewayConfig;
use ms_resilience::{CircuitBreakerRegistry, CircuitBreakerSettings};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// Address nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub fn test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(TEST_SECRET).unwrap())
}

/// Window 4, minimum 4 calls, 50% threshold
pub fn test_breaker_settings() -> CircuitBreakerSettings {
    CircuitBreakerSettings {
        sliding_window_size: 4,
        minimum_number_of_calls: 4,
        failure_rate_threshold: 50.0,
        open_duration: Duration::from_secs(60),
        half_open_permitted_calls: 1,
        call_timeout: Duration::from_millis(500),
    }
}

/// Default routes and allow-list with every upstream at `backend_url`.
pub fn gateway_config(backend_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    for route in &mut config.routes {
        route.upstream = backend_url.to_string();
    }
    config
}

pub fn create_test_app_state(config: GatewayConfig) -> AppState {
    AppState::new(
        test_codec(),
        config,
        CircuitBreakerRegistry::new(test_breaker_settings()),
    )
    .unwrap()
}

pub fn create_test_app(state: AppState) -> Router {
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    build_router(state, metrics)
}

pub fn bearer(username: &str, role: &str) -> String {
    let token = test_codec()
        .issue(username, &[format!("ROLE_{role}")], 3600)
        .unwrap();
    format!("Bearer {token}")
}

pub fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
