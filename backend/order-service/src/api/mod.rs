pub mod create_order_request;
pub mod diagnostics;
pub mod order_response;
pub mod orders;
pub mod period_query;
pub mod update_order_request;
