use crate::to_authority;

use serde::{Deserialize, Serialize};

/// Login credential held by the identity issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique login name
    pub username: String,
    /// bcrypt hash, never the plain password
    pub password_hash: String,
    /// Canonical bare role names (see `normalize_roles`)
    pub roles: Vec<String>,
}

impl Credential {
    /// Roles in `ROLE_`-prefixed form, as carried in tokens.
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(|role| to_authority(role)).collect()
    }
}
