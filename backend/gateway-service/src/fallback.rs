use ms_config::{RouteConfig, ServiceName};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{Value, json};

/// 503 returned when a route's backend is unreachable or its breaker is open.
pub fn service_unavailable(route: &RouteConfig) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "error": format!("{} is currently unavailable", route.name),
            "message": "Please try again later",
            "timestamp": Utc::now().to_rfc3339(),
            "service": route.id,
        })),
    )
        .into_response()
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "service": ServiceName::Gateway.as_str(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
