use crate::Result as AuthErrorResult;

use ms_core::Credential;

use async_trait::async_trait;

/// Persistence seam for the identity issuer.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AuthErrorResult<Option<Credential>>;

    /// Insert unless the username is taken; returns whichever record is stored.
    async fn insert_if_absent(&self, credential: &Credential) -> AuthErrorResult<Credential>;
}
