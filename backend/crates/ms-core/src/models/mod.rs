pub mod credential;
pub mod member;
pub mod member_status;
pub mod money;
pub mod order;
pub mod order_status;
