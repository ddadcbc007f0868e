//! ADMIN-only endpoints for observing the member-service circuit breaker.

use crate::{AppState, MEMBER_SERVICE_BREAKER, MemberRecord};

use ms_core::ADMIN_ROLE;
use ms_resilience::CircuitState;
use ms_web::{ApiResult, Authenticated};

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header::AUTHORIZATION},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Lookups issued by `force_fallback`; enough to fill the default window.
const FORCED_LOOKUPS: usize = 6;
const FORCED_LOOKUP_MEMBER_ID: i64 = 999;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerStatus {
    pub circuit_breaker_status: &'static str,
    pub service: &'static str,
    pub failure_rate: String,
    pub number_of_successful_calls: u32,
    pub number_of_failed_calls: u32,
    pub number_of_not_permitted_calls: u64,
    pub number_of_buffered_calls: u32,
    pub status_description: &'static str,
}

fn describe(state: CircuitState) -> &'static str {
    match state {
        CircuitState::Closed => "Normal operation, all requests pass through",
        CircuitState::Open => "Circuit open, requests are blocked and the fallback runs",
        CircuitState::HalfOpen => "Half-open, limited trial requests are testing recovery",
    }
}

/// GET /test/member/{id}
pub async fn test_member_lookup(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<MemberRecord>> {
    user.require_role(ADMIN_ROLE)?;
    log::info!("Testing member-service lookup for ID: {}", id);

    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Ok(Json(state.members.member(id, authorization).await))
}

/// GET /test/member-health
pub async fn test_member_health(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> ApiResult<Json<Value>> {
    user.require_role(ADMIN_ROLE)?;

    let health = state.members.health().await;
    let connection_status = if health.is_placeholder() {
        "FAILED"
    } else {
        "SUCCESS"
    };

    Ok(Json(json!({
        "memberServiceStatus": health.status,
        "memberServiceName": health.service,
        "connectionStatus": connection_status,
    })))
}

/// GET /test/circuit-breaker-status
pub async fn circuit_breaker_status(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> ApiResult<Json<CircuitBreakerStatus>> {
    user.require_role(ADMIN_ROLE)?;

    let metrics = state.members.breaker().metrics();
    log::info!(
        "Circuit breaker state: {}, failure rate: {:.2}%",
        metrics.state,
        metrics.failure_rate
    );

    Ok(Json(CircuitBreakerStatus {
        circuit_breaker_status: metrics.state.as_str(),
        service: MEMBER_SERVICE_BREAKER,
        failure_rate: format!("{:.2}%", metrics.failure_rate),
        number_of_successful_calls: metrics.successful_calls,
        number_of_failed_calls: metrics.failed_calls,
        number_of_not_permitted_calls: metrics.not_permitted_calls,
        number_of_buffered_calls: metrics.buffered_calls,
        status_description: describe(metrics.state),
    }))
}

/// POST /test/force-fallback
///
/// Looks up a member id that does not exist several times so the breaker
/// records failures.
pub async fn force_fallback(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    user.require_role(ADMIN_ROLE)?;
    log::info!("Forcing fallback with {} lookups", FORCED_LOOKUPS);

    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    for attempt in 1..=FORCED_LOOKUPS {
        let member = state
            .members
            .member(FORCED_LOOKUP_MEMBER_ID, authorization)
            .await;
        log::debug!("Fallback test call {}: status {}", attempt, member.status);
    }

    Ok(Json(json!({
        "message": "Fallback test completed",
        "note": "Check logs for fallback behavior",
        "circuitBreakerStatus": state.members.breaker().state().as_str(),
    })))
}
