use crate::{AppState, health, login};

use ms_config::ServiceName;

use axum::{
    Router,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};

/// Build the auth-service router
pub fn build_router(state: AppState, metrics: PrometheusHandle) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/health", get(health))
        .merge(ms_web::actuator_router(ServiceName::Auth.as_str(), metrics))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
