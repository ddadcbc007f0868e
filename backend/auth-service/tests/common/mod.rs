#![allow(dead_code)]

//! Test infrastructure for auth-service API tests

use auth_service::{AppState, build_router, seed_users};

use ms_auth::{IdentityIssuer, TokenCodec};
use ms_config::SeedUser;
use ms_db::{AUTH_MIGRATOR, CredentialRepository};

use std::sync::Arc;

use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";
pub const TOKEN_VALIDITY_SECS: i64 = 3600;

pub fn test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::from_secret(Some(TEST_SECRET)).unwrap())
}

/// AppState over an in-memory database holding `admin` (ADMIN) and `member` (USER)
pub async fn create_test_app_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    AUTH_MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let issuer = Arc::new(IdentityIssuer::new(
        Arc::new(CredentialRepository::new(pool)),
        test_codec(),
        TOKEN_VALIDITY_SECS,
    ));

    seed_users(
        &issuer,
        &[
            SeedUser {
                username: "admin".to_string(),
                password: "password123".to_string(),
                roles: vec!["ADMIN".to_string()],
            },
            SeedUser {
                username: "member".to_string(),
                password: "password123".to_string(),
                roles: vec!["USER".to_string()],
            },
        ],
    )
    .await
    .expect("Failed to seed users");

    AppState { issuer }
}

pub async fn create_test_app() -> Router {
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    build_router(create_test_app_state().await, metrics)
}
