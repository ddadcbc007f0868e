use ms_auth::IdentityIssuer;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<IdentityIssuer>,
}
