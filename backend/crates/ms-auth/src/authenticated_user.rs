use crate::{AuthError, Claims, Result as AuthErrorResult};

use ms_core::to_authority;

use std::panic::Location;

use error_location::ErrorLocation;

/// Caller identity established from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    /// `ROLE_`-prefixed, mapped 1:1 from the token's roles claim
    pub authorities: Vec<String>,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            authorities: claims.roles.iter().map(|role| to_authority(role)).collect(),
        }
    }

    /// `has_role("ADMIN")` matches the `ROLE_ADMIN` authority.
    pub fn has_role(&self, role: &str) -> bool {
        let authority = to_authority(role);
        self.authorities.iter().any(|a| *a == authority)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    #[track_caller]
    pub fn require_role(&self, role: &str) -> AuthErrorResult<()> {
        self.require_any_role(&[role])
    }

    #[track_caller]
    pub fn require_any_role(&self, roles: &[&str]) -> AuthErrorResult<()> {
        if self.has_any_role(roles) {
            return Ok(());
        }

        log::warn!(
            "User {} with {:?} denied, requires one of {:?}",
            self.username,
            self.authorities,
            roles
        );
        Err(AuthError::Forbidden {
            required: roles.iter().map(|role| to_authority(role)).collect(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
