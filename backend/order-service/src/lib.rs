pub mod api;
pub mod app_state;
pub mod client;
pub mod routes;

pub use api::{
    create_order_request::CreateOrderRequest,
    diagnostics::{
        CircuitBreakerStatus, circuit_breaker_status, force_fallback, test_member_health,
        test_member_lookup,
    },
    order_response::{OrderResponse, OrderSummary},
    orders::{
        create_order, delete_order, get_order, health, list_all_orders, list_member_orders,
        list_orders, list_orders_by_status, list_orders_in_period, list_recent_orders,
        member_total_amount, order_count_by_status, search_orders, update_order,
    },
    period_query::PeriodQuery,
    update_order_request::UpdateOrderRequest,
};
pub use app_state::AppState;
pub use client::{
    error::{ClientError, Result as ClientResult},
    member_client::MemberClient,
    member_directory::{MemberDirectory, MemberHealth, MemberRecord},
    member_integration::{MEMBER_SERVICE_BREAKER, MemberIntegration},
};
pub use routes::build_router;

#[cfg(test)]
mod tests;
