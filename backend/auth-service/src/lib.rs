pub mod api;
pub mod app_state;
pub mod routes;
pub mod seed;

pub use api::{
    health::health,
    login::login,
    login_request::LoginRequest,
};
pub use app_state::AppState;
pub use routes::build_router;
pub use seed::seed_users;
