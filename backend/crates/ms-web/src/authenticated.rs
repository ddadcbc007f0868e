//! Per-service token verification for incoming requests.

use crate::{ApiError, ApiResult};

use ms_auth::{AuthenticatedUser, TokenCodec, bearer_token};

use std::future::Future;
use std::panic::Location;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use error_location::ErrorLocation;

/// Caller identity, re-verified from the `Authorization` header.
///
/// Identity headers injected by the gateway are never consulted here; the
/// token itself is checked against this service's copy of the secret.
/// A missing or invalid token rejects the request with an empty 401.
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    Arc<TokenCodec>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let codec = Arc::<TokenCodec>::from_ref(state);

        async move { authenticate_headers(&parts.headers, &codec).map(Authenticated) }
    }
}

/// Verify the bearer token in `headers`.
#[track_caller]
pub fn authenticate_headers(headers: &HeaderMap, codec: &TokenCodec) -> ApiResult<AuthenticatedUser> {
    let location = ErrorLocation::from(Location::caller());

    let Some(header_value) = headers.get(AUTHORIZATION) else {
        return Err(ApiError::Unauthorized {
            message: "missing Authorization header".to_string(),
            location,
        });
    };

    let Some(token) = header_value.to_str().ok().and_then(bearer_token) else {
        return Err(ApiError::Unauthorized {
            message: "Authorization header is not a bearer token".to_string(),
            location,
        });
    };

    let claims = codec.verify(token).map_err(|e| ApiError::Unauthorized {
        message: e.to_string(),
        location,
    })?;

    log::debug!("Authenticated {} with {:?}", claims.sub, claims.roles);
    Ok(AuthenticatedUser::from_claims(claims))
}
