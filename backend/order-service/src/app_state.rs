use crate::MemberIntegration;

use ms_auth::TokenCodec;
use ms_db::OrderRepository;

use std::sync::Arc;

use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderRepository,
    pub members: Arc<MemberIntegration>,
    pub codec: Arc<TokenCodec>,
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.codec.clone()
    }
}
