use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// HS256 needs a key at least as long as its 256-bit output.
pub const MIN_SECRET_BYTES: usize = 32;

/// Signs and verifies HS256 tokens with a shared secret.
///
/// Stateless: every service holding the same secret verifies tokens
/// issued by any other without a network call.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    #[track_caller]
    pub fn new(secret: &[u8]) -> AuthErrorResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::Configuration {
                message: "jwt secret is not configured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::Configuration {
                message: format!(
                    "jwt secret must be at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    secret.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Expiry is checked by hand against an explicit clock, with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Create a codec from an optional configured secret.
    #[track_caller]
    pub fn from_secret(secret: Option<&str>) -> AuthErrorResult<Self> {
        Self::new(secret.unwrap_or_default().as_bytes())
    }

    /// Issue a token valid for `validity_secs` from now.
    #[track_caller]
    pub fn issue(
        &self,
        subject: &str,
        roles: &[String],
        validity_secs: i64,
    ) -> AuthErrorResult<String> {
        self.issue_at(subject, roles, validity_secs, chrono::Utc::now().timestamp())
    }

    #[track_caller]
    pub fn issue_at(
        &self,
        subject: &str,
        roles: &[String],
        validity_secs: i64,
        now: i64,
    ) -> AuthErrorResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat: now,
            exp: now + validity_secs,
        };
        claims.validate()?;

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| AuthError::JwtEncode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Verify signature, structure and expiry against the current time.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify against an explicit clock. A token is valid while `now < exp`.
    #[track_caller]
    pub fn verify_at(&self, token: &str, now: i64) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    ErrorKind::InvalidSignature => AuthError::InvalidToken {
                        message: "signature mismatch".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        let claims = token_data.claims;
        claims.validate()?;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }
}
