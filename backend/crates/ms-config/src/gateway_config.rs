use crate::member_client_config::is_http_url;
use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_IDENTITY_HEADER: &str = "X-Authenticated-User";
pub const DEFAULT_ROLES_HEADER: &str = "X-User-Roles";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// One upstream mapping: requests under `path_prefix` go to `upstream`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route id, also the circuit breaker name
    pub id: String,
    /// Human-readable name used in fallback messages
    pub name: String,
    pub path_prefix: String,
    /// Base URL of the backend, e.g. `http://127.0.0.1:8082`
    pub upstream: String,
    /// Replacement for `path_prefix` on the forwarded path
    #[serde(default)]
    pub rewrite_prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Path prefixes that skip token checks
    pub allow_list: Vec<String>,
    pub identity_header: String,
    pub roles_header: String,
    pub max_body_bytes: usize,
    pub routes: Vec<RouteConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            allow_list: ["/api/auth", "/auth", "/auth-service", "/actuator", "/auth/health", "/health"]
                .into_iter()
                .map(String::from)
                .collect(),
            identity_header: String::from(DEFAULT_IDENTITY_HEADER),
            roles_header: String::from(DEFAULT_ROLES_HEADER),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            routes: vec![
                RouteConfig {
                    id: "auth-service".to_string(),
                    name: "Auth Service".to_string(),
                    path_prefix: "/api/auth".to_string(),
                    upstream: "http://127.0.0.1:8081".to_string(),
                    rewrite_prefix: Some("/auth".to_string()),
                },
                RouteConfig {
                    id: "member-service".to_string(),
                    name: "Member Service".to_string(),
                    path_prefix: "/api/members".to_string(),
                    upstream: "http://127.0.0.1:8082".to_string(),
                    rewrite_prefix: Some("/members".to_string()),
                },
                RouteConfig {
                    id: "order-service".to_string(),
                    name: "Order Service".to_string(),
                    path_prefix: "/api/orders".to_string(),
                    upstream: "http://127.0.0.1:8083".to_string(),
                    rewrite_prefix: Some("/orders".to_string()),
                },
            ],
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for prefix in &self.allow_list {
            if !prefix.starts_with('/') {
                return Err(ConfigError::gateway(format!(
                    "gateway.allow_list entries must start with '/', got '{}'",
                    prefix
                )));
            }
        }

        for (field, name) in [
            ("identity_header", &self.identity_header),
            ("roles_header", &self.roles_header),
        ] {
            let valid = !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
            if !valid {
                return Err(ConfigError::gateway(format!(
                    "gateway.{} is not a valid header name: '{}'",
                    field, name
                )));
            }
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::gateway("gateway.max_body_bytes must be > 0"));
        }

        for route in &self.routes {
            if route.id.trim().is_empty() {
                return Err(ConfigError::gateway("gateway.routes[].id cannot be empty"));
            }
            if !route.path_prefix.starts_with('/') {
                return Err(ConfigError::gateway(format!(
                    "route '{}': path_prefix must start with '/'",
                    route.id
                )));
            }
            if !is_http_url(&route.upstream) {
                return Err(ConfigError::gateway(format!(
                    "route '{}': upstream must be an http(s) URL, got '{}'",
                    route.id, route.upstream
                )));
            }
            if let Some(rewrite) = &route.rewrite_prefix
                && !rewrite.starts_with('/')
            {
                return Err(ConfigError::gateway(format!(
                    "route '{}': rewrite_prefix must start with '/'",
                    route.id
                )));
            }
        }

        Ok(())
    }

    /// Longest matching route for a request path.
    pub fn route_for(&self, path: &str) -> Option<&RouteConfig> {
        self.routes
            .iter()
            .filter(|route| path_has_prefix(path, &route.path_prefix))
            .max_by_key(|route| route.path_prefix.len())
    }
}

/// `/api/members/1` and `/api/members` match `/api/members`; `/api/membersx` does not.
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}
