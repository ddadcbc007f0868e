use crate::{
    AppState, circuit_breaker_status, create_order, delete_order, force_fallback, get_order,
    health, list_all_orders, list_member_orders, list_orders, list_orders_by_status,
    list_orders_in_period, list_recent_orders, member_total_amount, order_count_by_status,
    search_orders, test_member_health, test_member_lookup, update_order,
};

use ms_config::ServiceName;

use axum::{
    Router,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};

/// Build the order-service router
pub fn build_router(state: AppState, metrics: PrometheusHandle) -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/all", get(list_all_orders))
        .route("/orders/recent", get(list_recent_orders))
        .route("/orders/search", get(search_orders))
        .route("/orders/period", get(list_orders_in_period))
        .route("/orders/health", get(health))
        .route("/orders/member/{member_id}", get(list_member_orders))
        .route("/orders/status/{status}", get(list_orders_by_status))
        .route(
            "/orders/stats/total-amount/{member_id}",
            get(member_total_amount),
        )
        .route("/orders/stats/count/{status}", get(order_count_by_status))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        // Diagnostics
        .route("/test/member/{id}", get(test_member_lookup))
        .route("/test/member-health", get(test_member_health))
        .route("/test/circuit-breaker-status", get(circuit_breaker_status))
        .route("/test/force-fallback", post(force_fallback))
        .merge(ms_web::actuator_router(ServiceName::Order.as_str(), metrics))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
