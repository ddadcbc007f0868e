use crate::{ServerError, ServerErrorResult};

use axum::{
    Json, Router,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::{Value, json};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Install the process-wide Prometheus recorder. Call once, from `main`.
pub fn install_metrics_recorder() -> ServerErrorResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: format!("Failed to install Prometheus recorder: {}", e),
        })
}

/// Minimal liveness payload.
pub fn health_body(service: &str) -> Value {
    json!({
        "status": "UP",
        "service": service,
    })
}

/// `/actuator/health` and `/actuator/prometheus`, both unauthenticated.
pub fn actuator_router<S>(service: &'static str, metrics: PrometheusHandle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/actuator/health", get(move || health(service)))
        .route("/actuator/prometheus", get(move || prometheus(metrics.clone())))
}

async fn health(service: &'static str) -> Response {
    let health = json!({
        "status": "UP",
        "service": service,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

async fn prometheus(metrics: PrometheusHandle) -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        metrics.render(),
    )
        .into_response()
}
