use crate::{AppState, edge_authenticate, health, proxy};

use ms_config::ServiceName;

use axum::{Router, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};

/// Build the gateway router
///
/// The edge authenticator wraps every route, the proxy fallback included.
pub fn build_router(state: AppState, metrics: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(ms_web::actuator_router(ServiceName::Gateway.as_str(), metrics))
        .fallback(proxy)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            edge_authenticate,
        ))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
