//! Token gate in front of every proxied route.
//!
//! Per request, in order: log the caller, drop client-supplied identity
//! headers, let OPTIONS and allow-listed paths through, then require a valid
//! bearer token and attach the subject and roles as headers for the backend.
//! Backends still re-verify the `Authorization` header themselves.

use crate::AppState;

use ms_auth::{Claims, TokenCodec, bearer_token};
use ms_web::extract_client_ip;

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::{debug, info, warn};
use metrics::counter;

/// Why a request was turned away with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingAuthorization,
    NotBearer,
    InvalidToken,
    /// Verified claims that cannot be carried in a header value
    UnrepresentableClaims,
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingAuthorization => "missing_authorization",
            Self::NotBearer => "not_bearer",
            Self::InvalidToken => "invalid_token",
            Self::UnrepresentableClaims => "unrepresentable_claims",
        }
    }
}

/// Raw prefix match, so `/healthz` is covered by `/health`.
pub fn is_allow_listed(allow_list: &[String], path: &str) -> bool {
    allow_list.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

/// Verify the bearer token carried in `headers`.
pub fn verify_request(codec: &TokenCodec, headers: &HeaderMap) -> Result<Claims, Rejection> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(Rejection::MissingAuthorization)?;

    let token = header_value
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(Rejection::NotBearer)?;

    codec.verify(token).map_err(|e| {
        warn!("Token verification failed: {}", e);
        Rejection::InvalidToken
    })
}

/// Identity and comma-joined roles header values for verified claims.
pub fn identity_values(claims: &Claims) -> Result<(HeaderValue, HeaderValue), Rejection> {
    let identity =
        HeaderValue::from_str(&claims.sub).map_err(|_| Rejection::UnrepresentableClaims)?;
    let roles = HeaderValue::from_str(&claims.roles.join(","))
        .map_err(|_| Rejection::UnrepresentableClaims)?;
    Ok((identity, roles))
}

pub async fn edge_authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client_ip = extract_client_ip(request.headers(), peer);
    info!(
        "[GATEWAY] {} {} -> Client IP: {}",
        request.method(),
        request.uri(),
        client_ip
    );

    // Only this middleware may set the identity headers
    let headers = request.headers_mut();
    headers.remove(&state.identity_header);
    headers.remove(&state.roles_header);

    if request.method() == Method::OPTIONS
        || is_allow_listed(&state.gateway.allow_list, request.uri().path())
    {
        counter!("ms_gateway_requests_total", "outcome" => "bypassed").increment(1);
        return next.run(request).await;
    }

    let admitted = verify_request(&state.codec, request.headers())
        .and_then(|claims| identity_values(&claims).map(|values| (claims, values)));

    let (claims, (identity, roles)) = match admitted {
        Ok(admitted) => admitted,
        Err(rejection) => {
            warn!(
                "Rejected {} {}: {}",
                request.method(),
                request.uri().path(),
                rejection.reason()
            );
            counter!(
                "ms_gateway_requests_total",
                "outcome" => "rejected",
                "reason" => rejection.reason()
            )
            .increment(1);
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    debug!("Admitted {} with roles {:?}", claims.sub, claims.roles);
    counter!("ms_gateway_requests_total", "outcome" => "admitted").increment(1);

    let headers = request.headers_mut();
    headers.insert(state.identity_header.clone(), identity);
    headers.insert(state.roles_header.clone(), roles);

    next.run(request).await
}
