//! Credential checks and token issuance.

use crate::{
    AuthError, CredentialStore, Result as AuthErrorResult, TokenCodec, hash_password,
    verify_password,
};

use ms_core::{Credential, normalize_roles};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE: &str = "Bearer";

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub username: String,
    /// Authorities carried in the token
    pub roles: Vec<String>,
}

#[derive(Clone)]
pub struct IdentityIssuer {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
    validity_secs: i64,
}

impl IdentityIssuer {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>, validity_secs: i64) -> Self {
        Self {
            store,
            codec,
            validity_secs,
        }
    }

    pub fn validity_secs(&self) -> i64 {
        self.validity_secs
    }

    /// Look up and check credentials.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthErrorResult<Credential> {
        let location = ErrorLocation::from(Location::caller());

        let Some(credential) = self.store.find_by_username(username).await? else {
            warn!("Authentication failed for {}: unknown user", username);
            return Err(AuthError::AuthenticationFailed { location });
        };

        if !verify_password(password, &credential.password_hash)? {
            warn!("Authentication failed for {}: bad password", username);
            return Err(AuthError::AuthenticationFailed { location });
        }

        Ok(credential)
    }

    /// Create a credential, or return the existing one unchanged.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        roles: &[String],
    ) -> AuthErrorResult<Credential> {
        if let Some(existing) = self.store.find_by_username(username).await? {
            return Ok(existing);
        }

        let credential = Credential {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            roles: normalize_roles(roles),
        };

        let stored = self.store.insert_if_absent(&credential).await?;
        if stored.password_hash == credential.password_hash {
            info!("Registered user {} with roles {:?}", stored.username, stored.roles);
        }
        Ok(stored)
    }

    /// Authenticate, then issue a token carrying the credential's authorities.
    pub async fn login(&self, username: &str, password: &str) -> AuthErrorResult<IssuedToken> {
        let credential = self.authenticate(username, password).await?;
        let authorities = credential.authorities();

        let access_token = self
            .codec
            .issue(&credential.username, &authorities, self.validity_secs)?;

        info!("Issued token for {}", credential.username);

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.validity_secs,
            username: credential.username,
            roles: authorities,
        })
    }
}
