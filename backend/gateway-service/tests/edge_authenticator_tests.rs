//! Token gate behavior in front of a mocked backend

mod common;

use crate::common::{
    bearer, body_bytes, create_test_app, create_test_app_state, gateway_config, request,
    test_codec,
};

use axum::http::StatusCode;
use googletest::prelude::*;
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn given_allow_listed_path_without_token_when_requested_then_forwarded() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "t"})))
        .expect(1)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    // When
    let response = app
        .oneshot(request("POST", "/api/auth/login", None))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_protected_path_without_token_when_requested_then_401_and_not_forwarded() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(path("/members/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    // When
    let response = app
        .oneshot(request("GET", "/api/members/1", None))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_that!(body_bytes(response).await, is_empty());
}

#[tokio::test]
async fn given_non_bearer_scheme_when_requested_then_401_and_not_forwarded() {
    let backend = MockServer::start().await;
    Mock::given(path("/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    let response = app
        .oneshot(request("GET", "/api/orders", Some("Token abc.def.ghi")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_garbage_token_when_requested_then_401_and_not_forwarded() {
    let backend = MockServer::start().await;
    Mock::given(path("/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    let response = app
        .oneshot(request("GET", "/api/orders", Some("Bearer not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_expired_token_when_requested_then_401() {
    let backend = MockServer::start().await;
    Mock::given(path("/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));
    let issued_at = chrono::Utc::now().timestamp() - 3600;
    let token = test_codec()
        .issue_at("admin", &["ROLE_ADMIN".to_string()], 60, issued_at)
        .unwrap();

    let response = app
        .oneshot(request("GET", "/api/orders", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_valid_token_when_requested_then_identity_headers_are_forwarded() {
    // Given
    let backend = MockServer::start().await;
    let authorization = bearer("admin", "ADMIN");
    Mock::given(method("GET"))
        .and(path("/members/1"))
        .and(header("X-Authenticated-User", "admin"))
        .and(header("X-User-Roles", "ROLE_ADMIN"))
        .and(header("Authorization", authorization.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));

    // When
    let response = app
        .oneshot(request("GET", "/api/members/1", Some(&authorization)))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_forged_identity_headers_with_valid_token_when_requested_then_token_identity_wins() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(path("/orders"))
        .and(header("X-Authenticated-User", "member"))
        .and(header("X-User-Roles", "ROLE_USER"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));
    let mut forged = request("GET", "/api/orders", Some(&bearer("member", "USER")));
    forged
        .headers_mut()
        .insert("x-authenticated-user", "admin".parse().unwrap());
    forged
        .headers_mut()
        .insert("x-user-roles", "ROLE_ADMIN".parse().unwrap());

    // When
    let response = app.oneshot(forged).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_forged_identity_headers_on_public_path_when_forwarded_then_headers_are_removed() {
    // Given
    let backend = MockServer::start().await;
    Mock::given(path("/auth/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend)
        .await;
    let app = create_test_app(create_test_app_state(gateway_config(&backend.uri())));
    let mut forged = request("GET", "/api/auth/health", None);
    forged
        .headers_mut()
        .insert("x-authenticated-user", "admin".parse().unwrap());
    forged
        .headers_mut()
        .insert("x-user-roles", "ROLE_ADMIN".parse().unwrap());

    // When
    let response = app.oneshot(forged).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let received = backend.received_requests().await.unwrap();
    assert_that!(received, len(eq(1)));
    assert!(!received[0].headers.contains_key("x-authenticated-user"));
    assert!(!received[0].headers.contains_key("x-user-roles"));
}

#[tokio::test]
async fn given_preflight_without_token_when_requested_then_not_rejected() {
    let app = create_test_app(create_test_app_state(gateway_config(
        common::UNREACHABLE_URL,
    )));

    let mut preflight = request("OPTIONS", "/api/members/1", None);
    preflight
        .headers_mut()
        .insert("origin", "http://localhost:3000".parse().unwrap());
    preflight
        .headers_mut()
        .insert("access-control-request-method", "DELETE".parse().unwrap());

    let response = app.oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn given_unknown_path_with_token_when_requested_then_404_json() {
    let app = create_test_app(create_test_app_state(gateway_config(
        common::UNREACHABLE_URL,
    )));

    let response = app
        .oneshot(request(
            "GET",
            "/api/products/1",
            Some(&bearer("admin", "ADMIN")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn given_unknown_path_without_token_when_requested_then_401() {
    let app = create_test_app(create_test_app_state(gateway_config(
        common::UNREACHABLE_URL,
    )));

    let response = app
        .oneshot(request("GET", "/api/products/1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
