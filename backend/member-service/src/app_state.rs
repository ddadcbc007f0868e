use ms_auth::TokenCodec;
use ms_db::MemberRepository;

use std::sync::Arc;

use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub members: MemberRepository,
    pub codec: Arc<TokenCodec>,
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.codec.clone()
    }
}
