#![allow(dead_code)]

//! Test infrastructure for member-service API tests

use member_service::{AppState, build_router};

use ms_auth::TokenCodec;
use ms_db::{MEMBER_MIGRATOR, MemberRepository};

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub async fn create_test_app_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    MEMBER_MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    AppState {
        members: MemberRepository::new(pool),
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
    body: Option<serde_json::Value>,
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

pub async fn body_json(response: Response<axum::body::Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn new_member_body(tag: &str) -> serde_json::Value {
    serde_json::json!({
        "username": format!("user_{tag}"),
        "password": "secret-pass",
        "email": format!("{tag}@example.com"),
        "fullName": format!("Test {tag}"),
        "phoneNumber": "010-1234-5678",
    })
}
