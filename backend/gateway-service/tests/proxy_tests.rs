//! Forwarding, rewriting and per-route fallback

mod common;

use crate::common::{
    UNREACHABLE_URL, bearer, body_json, create_test_app, create_test_app_state, gateway_config,
    json_request, request,
};

use ms_resilience::CircuitState;

use axum::http::StatusCode;
use googletest::prelude::*;
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json as body_json_matcher, method, path, query_param},
};

#[tokio::test]
async fn given_query_string_when_forwarded_then_path_is_rewritten_and_query_kept() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .expect(1)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    // When
    let response = app
        .oneshot(request(
            "GET",
            "/api/members?page=1&size=5",
            Some(&bearer("admin", "ADMIN")),
        ))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"content": []}));
}

#[tokio::test]
async fn given_json_body_when_forwarded_then_backend_receives_it() {
    let backend = MockServer::start().await;
    let order = json!({"memberId": 1, "productName": "Keyboard", "quantity": 1, "unitPrice": 10});
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json_matcher(&order))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some(&bearer("member", "USER")),
            order.clone(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], 5);
}

#[tokio::test]
async fn given_backend_error_status_when_forwarded_then_passed_through_and_not_counted() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(path("/orders/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(4)
        .mount(&backend)
        .await;
    let state = create_test_app_state(gateway_config(&backend.uri()));
    let authorization = bearer("admin", "ADMIN");

    // When
    for _ in 0..4 {
        let response = create_test_app(state.clone())
            .oneshot(request("GET", "/api/orders/1", Some(&authorization)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // Then
    let metrics = state.breakers.breaker("order-service").metrics();
    assert_that!(metrics.state, eq(CircuitState::Closed));
    assert_that!(metrics.failed_calls, eq(0));
    assert_that!(metrics.successful_calls, eq(4));
}

#[tokio::test]
async fn given_unreachable_backend_when_forwarded_then_503_fallback() {
    let app = create_test_app(create_test_app_state(gateway_config(UNREACHABLE_URL)));

    let response = app
        .oneshot(request(
            "GET",
            "/api/members/1",
            Some(&bearer("admin", "ADMIN")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Member Service is currently unavailable");
    assert_eq!(json["message"], "Please try again later");
    assert_eq!(json["service"], "member-service");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn given_repeated_transport_failures_when_forwarded_then_route_breaker_opens() {
    // Given
    let state = create_test_app_state(gateway_config(UNREACHABLE_URL));
    let authorization = bearer("admin", "ADMIN");

    // When
    for _ in 0..5 {
        let response = create_test_app(state.clone())
            .oneshot(request("GET", "/api/orders", Some(&authorization)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    // Then
    let metrics = state.breakers.breaker("order-service").metrics();
    assert_that!(metrics.state, eq(CircuitState::Open));
    assert_that!(metrics.failed_calls, eq(4));
    assert_that!(metrics.not_permitted_calls, eq(1));
    assert!(state.breakers.get("member-service").is_none());
}

#[tokio::test]
async fn given_body_over_limit_when_forwarded_then_413_and_not_forwarded() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let mut config = gateway_config(&backend.uri());
    config.max_body_bytes = 16;
    let app = create_test_app(create_test_app_state(config));

    // When
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"username": "admin", "password": "a-long-enough-password"}),
        ))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn given_health_when_requested_then_up_without_token() {
    let app = create_test_app(create_test_app_state(gateway_config(UNREACHABLE_URL)));

    let response = app.oneshot(request("GET", "/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "UP");
    assert_eq!(json["service"], "gateway-service");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn given_actuator_health_when_requested_then_up_without_token() {
    let app = create_test_app(create_test_app_state(gateway_config(UNREACHABLE_URL)));

    let response = app
        .oneshot(request("GET", "/actuator/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["service"], "gateway-service");
}
