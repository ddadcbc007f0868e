//! Reverse proxy to the configured backends.
//!
//! Each route is called through its own circuit breaker. Only transport
//! errors and timeouts count as failures; any HTTP response from the backend,
//! including a 5xx, is passed back to the caller unchanged.

use crate::{AppState, service_unavailable};

use ms_config::RouteConfig;
use ms_web::ApiError;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header::HOST},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http_body_util::LengthLimitError;
use log::{debug, warn};

/// Headers that describe one connection and are never forwarded.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "content-length"
    )
}

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| **name != HOST && !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Backend URL for `uri` on `route`: prefix rewritten, query string kept.
pub fn upstream_url(route: &RouteConfig, uri: &Uri) -> String {
    let path = uri.path();
    let path = match (&route.rewrite_prefix, path.strip_prefix(route.path_prefix.as_str())) {
        (Some(rewrite), Some(rest)) => format!("{}{}", rewrite, rest),
        _ => path.to_string(),
    };

    let mut url = format!("{}{}", route.upstream.trim_end_matches('/'), path);
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    url
}

async fn forward(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, reqwest::Error> {
    let upstream = client
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwardable(upstream.headers());
    let body = upstream.bytes().await?;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Status for a request body that could not be buffered: 413 when it ran
/// past the size limit, 400 when the client stream itself failed.
pub(crate) fn body_rejection(error: &axum::Error) -> StatusCode {
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(current) = cause {
        if current.is::<LengthLimitError>() {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        cause = current.source();
    }
    StatusCode::BAD_REQUEST
}

/// Fallback handler: everything the gateway does not serve itself.
pub async fn proxy(State(state): State<AppState>, request: Request) -> Response {
    let Some(route) = state.gateway.route_for(request.uri().path()).cloned() else {
        return ApiError::not_found(format!("No route for {}", request.uri().path()))
            .into_response();
    };

    let url = upstream_url(&route, request.uri());
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.gateway.max_body_bytes).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Request body for {} not forwarded: {}", url, e);
            return body_rejection(&e).into_response();
        }
    };

    debug!("Forwarding {} {} to {}", parts.method, parts.uri, url);
    let breaker = state.breakers.breaker(&route.id);
    breaker
        .call(
            || forward(&state.client, parts.method, &url, forwardable(&parts.headers), body),
            |_| service_unavailable(&route),
        )
        .await
}
