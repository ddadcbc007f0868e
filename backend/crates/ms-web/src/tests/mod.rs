
use ms_auth::TokenCodec;

use std::sync::Arc;

use axum::response::Response;
use http_body_util::BodyExt;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub(crate) fn test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(TEST_SECRET).unwrap())
}

pub(crate) async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
