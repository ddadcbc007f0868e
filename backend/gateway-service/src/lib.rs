pub mod app_state;
pub mod edge_authenticator;
pub mod error;
pub mod fallback;
pub mod proxy;
pub mod routes;

pub use app_state::AppState;
pub use edge_authenticator::{
    Rejection, edge_authenticate, identity_values, is_allow_listed, verify_request,
};
pub use error::{GatewayError, Result as GatewayErrorResult};
pub use fallback::{health, service_unavailable};
pub use proxy::{proxy, upstream_url};
pub use routes::build_router;
