use crate::{
    AppState, active_member_count, create_member, delete_member, get_member,
    get_member_by_username, health, list_all_members, list_members, list_members_by_status,
    search_members, update_member,
};

use ms_config::ServiceName;

use axum::{Router, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};

/// Build the member-service router
pub fn build_router(state: AppState, metrics: PrometheusHandle) -> Router {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route("/members/all", get(list_all_members))
        .route("/members/search", get(search_members))
        .route("/members/health", get(health))
        .route("/members/stats/active-count", get(active_member_count))
        .route("/members/username/{username}", get(get_member_by_username))
        .route("/members/status/{status}", get(list_members_by_status))
        .route(
            "/members/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .merge(ms_web::actuator_router(ServiceName::Member.as_str(), metrics))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
