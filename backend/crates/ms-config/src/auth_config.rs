use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_VALIDITY_SECS,
    MAX_ACCESS_TOKEN_VALIDITY_SECS, MIN_ACCESS_TOKEN_VALIDITY_SECS, MIN_JWT_SECRET_LENGTH,
};

use serde::Deserialize;

/// Account registered at auth-service startup
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HS256 secret; must be identical in every service
    pub jwt_secret: Option<String>,
    pub access_token_validity_secs: i64,
    pub seed_users: Vec<SeedUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_token_validity_secs: DEFAULT_ACCESS_TOKEN_VALIDITY_SECS,
            seed_users: vec![
                SeedUser {
                    username: "admin".to_string(),
                    password: "password123".to_string(),
                    roles: vec!["ADMIN".to_string()],
                },
                SeedUser {
                    username: "member".to_string(),
                    password: "password123".to_string(),
                    roles: vec!["USER".to_string()],
                },
            ],
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let Some(secret) = self.jwt_secret.as_deref() else {
            return Err(ConfigError::auth(
                "auth.jwt_secret is required (set MS_AUTH_JWT_SECRET)",
            ));
        };

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        if self.access_token_validity_secs < MIN_ACCESS_TOKEN_VALIDITY_SECS
            || self.access_token_validity_secs > MAX_ACCESS_TOKEN_VALIDITY_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.access_token_validity_secs must be {}-{}, got {}",
                MIN_ACCESS_TOKEN_VALIDITY_SECS,
                MAX_ACCESS_TOKEN_VALIDITY_SECS,
                self.access_token_validity_secs
            )));
        }

        for seed in &self.seed_users {
            if seed.username.trim().is_empty() || seed.password.is_empty() {
                return Err(ConfigError::auth(
                    "auth.seed_users entries need a username and password",
                ));
            }
        }

        Ok(())
    }
}
