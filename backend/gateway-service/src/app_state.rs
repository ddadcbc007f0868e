use crate::{GatewayError, GatewayErrorResult};

use ms_auth::TokenCodec;
use ms_config::GatewayConfig;
use ms_resilience::CircuitBreakerRegistry;

use std::panic::Location;
use std::sync::Arc;

use axum::http::HeaderName;
use error_location::ErrorLocation;

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub gateway: Arc<GatewayConfig>,
    /// Parsed `gateway.identity_header`
    pub identity_header: HeaderName,
    /// Parsed `gateway.roles_header`
    pub roles_header: HeaderName,
    /// One breaker per route id
    pub breakers: Arc<CircuitBreakerRegistry>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(
        codec: Arc<TokenCodec>,
        gateway: GatewayConfig,
        breakers: CircuitBreakerRegistry,
    ) -> GatewayErrorResult<Self> {
        let identity_header = parse_header_name(&gateway.identity_header)?;
        let roles_header = parse_header_name(&gateway.roles_header)?;

        // Redirects are passed back to the caller, not followed. Call
        // duration is bounded by the route's breaker timeout.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            codec,
            gateway: Arc::new(gateway),
            identity_header,
            roles_header,
            breakers: Arc::new(breakers),
            client,
        })
    }
}

#[track_caller]
fn parse_header_name(name: &str) -> GatewayErrorResult<HeaderName> {
    let location = ErrorLocation::from(Location::caller());

    HeaderName::from_bytes(name.as_bytes()).map_err(|_| GatewayError::HeaderName {
        name: name.to_string(),
        location,
    })
}
