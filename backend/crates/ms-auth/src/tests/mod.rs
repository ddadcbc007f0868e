mod token_codec;

use crate::{CredentialStore, Result as AuthErrorResult};

use ms_core::Credential;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// In-memory credential store for issuer tests
#[derive(Default)]
pub(crate) struct MemoryStore {
    credentials: Mutex<HashMap<String, Credential>>,
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AuthErrorResult<Option<Credential>> {
        Ok(self.credentials.lock().unwrap().get(username).cloned())
    }

    async fn insert_if_absent(&self, credential: &Credential) -> AuthErrorResult<Credential> {
        let mut credentials = self.credentials.lock().unwrap();
        Ok(credentials
            .entry(credential.username.clone())
            .or_insert_with(|| credential.clone())
            .clone())
    }
}
