pub mod error;
pub mod pool;
pub mod repositories;

pub use error::{DbError, Result};
pub use pool::{AUTH_MIGRATOR, MEMBER_MIGRATOR, ORDER_MIGRATOR, open_pool};
pub use repositories::credential_repository::CredentialRepository;
pub use repositories::member_repository::{MemberRepository, MemberUpdate};
pub use repositories::order_repository::OrderRepository;
