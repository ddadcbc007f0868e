#![allow(dead_code)]

//! Test infrastructure for order-service API tests

use order_service::{AppState, MemberClient, MemberIntegration, build_router};

use ms_auth::TokenCodec;
use ms_db::{ORDER_MIGRATOR, OrderRepository};
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
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

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

/// App state whose member lookups go to `member_service_url`.
pub async fn create_test_app_state(member_service_url: &str) -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    ORDER_MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let registry = CircuitBreakerRegistry::new(test_breaker_settings());
    let client = MemberClient::new(member_service_url).expect("Failed to build member client");

    AppState {
        orders: OrderRepository::new(pool),
        members: Arc::new(MemberIntegration::new(Arc::new(client), &registry)),
        codec: Arc::new(TokenCodec::new(TEST_SECRET).unwrap()),
    }
}

pub fn create_test_app(state: AppState) -> Router {
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    build_router(state, metrics)
}

pub fn bearer(state: &AppState, username: &str, role: &str) -> String {
    let token = state
        .codec
        .issue(username, &[format!("ROLE_{role}")], 3600)
        .unwrap();
    format!("Bearer {token}")
}

pub fn admin_bearer(state: &AppState) -> String {
    bearer(state, "admin", "ADMIN")
}

pub fn user_bearer(state: &AppState) -> String {
    bearer(state, "member", "USER")
}

pub fn json_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    builder.body(body).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn member_json(id: i64, full_name: &str) -> Value {
    json!({
        "id": id,
        "username": format!("member{id}"),
        "email": format!("member{id}@example.com"),
        "fullName": full_name,
        "phoneNumber": "010-0000-0000",
        "status": "ACTIVE",
        "statusDescription": "Active",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
    })
}

/// Serve `GET /members/{id}` from the mock member-service.
pub async fn mount_member(server: &MockServer, id: i64, full_name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/members/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_json(id, full_name)))
        .mount(server)
        .await;
}

pub fn new_order_body(member_id: i64, product_name: &str) -> Value {
    json!({
        "memberId": member_id,
        "productName": product_name,
        "quantity": 2,
        "unitPrice": 15000.5,
        "orderMemo": "leave at the door",
    })
}
