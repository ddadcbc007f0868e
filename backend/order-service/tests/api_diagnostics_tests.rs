//! Circuit breaker diagnostics and fallback behaviour over HTTP

mod common;

use crate::common::{
    admin_bearer, body_json, create_test_app, create_test_app_state, json_request,
    new_order_body, user_bearer,
};

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn given_user_role_when_reading_breaker_status_then_403() {
    let member_service = MockServer::start().await;
    let state = create_test_app_state(&member_service.uri()).await;
    let user = user_bearer(&state);

    let response = create_test_app(state)
        .oneshot(json_request("GET", "/test/circuit-breaker-status", Some(&user), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_fresh_breaker_when_reading_status_then_closed_without_rate() {
    let member_service = MockServer::start().await;
    let state = create_test_app_state(&member_service.uri()).await;
    let admin = admin_bearer(&state);

    let response = create_test_app(state)
        .oneshot(json_request("GET", "/test/circuit-breaker-status", Some(&admin), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["circuitBreakerStatus"], "CLOSED");
    assert_eq!(json["service"], "member-service");
    assert_eq!(json["failureRate"], "-1.00%");
    assert_eq!(json["numberOfBufferedCalls"], 0);
}

#[tokio::test]
async fn given_missing_member_when_forcing_fallback_then_circuit_opens() {
    // Given
    let member_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(4)
        .mount(&member_service)
        .await;
    let state = create_test_app_state(&member_service.uri()).await;
    let admin = admin_bearer(&state);
    let app = create_test_app(state);

    // When
    let forced = app
        .clone()
        .oneshot(json_request("POST", "/test/force-fallback", Some(&admin), None))
        .await
        .unwrap();
    let status = body_json(
        app.oneshot(json_request("GET", "/test/circuit-breaker-status", Some(&admin), None))
            .await
            .unwrap(),
    )
    .await;

    // Then
    assert_eq!(forced.status(), StatusCode::OK);
    let forced = body_json(forced).await;
    assert_eq!(forced["message"], "Fallback test completed");
    assert_eq!(forced["circuitBreakerStatus"], "OPEN");

    assert_eq!(status["circuitBreakerStatus"], "OPEN");
    assert_eq!(status["failureRate"], "100.00%");
    assert_eq!(status["numberOfFailedCalls"], 4);
    assert_eq!(status["numberOfNotPermittedCalls"], 2);
}

#[tokio::test]
async fn given_open_circuit_when_creating_order_then_peer_skipped_and_order_accepted() {
    // Given
    let member_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/999"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&member_service)
        .await;
    Mock::given(method("GET"))
        .and(path("/members/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::member_json(1, "Jane Doe")),
        )
        .expect(0)
        .mount(&member_service)
        .await;
    let state = create_test_app_state(&member_service.uri()).await;
    let admin = admin_bearer(&state);
    let app = create_test_app(state);
    app.clone()
        .oneshot(json_request("POST", "/test/force-fallback", Some(&admin), None))
        .await
        .unwrap();

    // When
    let response = app
        .oneshot(json_request("POST", "/orders", Some(&admin), Some(new_order_body(1, "Keyboard"))))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["memberName"], "Unknown User");
}

#[tokio::test]
async fn given_member_service_down_when_looking_up_member_then_placeholder_returned() {
    let member_service = MockServer::start().await;
    let state = create_test_app_state(&member_service.uri()).await;
    let admin = admin_bearer(&state);

    let response = create_test_app(state)
        .oneshot(json_request("GET", "/test/member/12", Some(&admin), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({
            "id": 12,
            "username": "unknown-user-12",
            "email": "unknown@example.com",
            "fullName": "Unknown User",
            "phoneNumber": "000-0000-0000",
            "status": "UNKNOWN",
            "statusDescription": "Service temporarily unavailable",
        })
    );
}

#[tokio::test]
async fn given_member_service_healthy_when_probing_then_success_reported() {
    let member_service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "UP",
            "service": "member-service",
        })))
        .mount(&member_service)
        .await;
    let state = create_test_app_state(&member_service.uri()).await;
    let admin = admin_bearer(&state);

    let response = create_test_app(state)
        .oneshot(json_request("GET", "/test/member-health", Some(&admin), None))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["memberServiceStatus"], "UP");
    assert_eq!(json["connectionStatus"], "SUCCESS");
}

#[tokio::test]
async fn given_member_service_down_when_probing_then_fallback_health_reported() {
    let state = create_test_app_state("http://127.0.0.1:1").await;
    let admin = admin_bearer(&state);

    let response = create_test_app(state)
        .oneshot(json_request("GET", "/test/member-health", Some(&admin), None))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["memberServiceStatus"], "DOWN");
    assert_eq!(json["memberServiceName"], "member-service-fallback");
    assert_eq!(json["connectionStatus"], "FAILED");
}
