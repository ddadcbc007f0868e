pub mod error;
pub mod models;
pub mod roles;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::credential::Credential;
pub use models::member::{Member, NewMember};
pub use models::member_status::MemberStatus;
pub use models::money::{MAX_ORDER_TOTAL, Money};
pub use models::order::{NewOrder, Order};
pub use models::order_status::OrderStatus;
pub use roles::{
    ADMIN_ROLE, DEFAULT_ROLE, ROLE_PREFIX, USER_ROLE, join_roles, normalize_roles, split_roles,
    to_authority,
};

#[cfg(test)]
mod tests;
