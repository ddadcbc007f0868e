//! SQLite-backed credential store for the identity issuer.

use crate::{DbError, Result as DbErrorResult};

use ms_auth::{AuthError, CredentialStore, Result as AuthErrorResult};
use error_location::ErrorLocation;
use ms_core::{Credential, join_roles, split_roles};

use std::panic::Location;

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct CredentialRow {
    username: String,
    password_hash: String,
    roles: String,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Credential {
            username: row.username,
            password_hash: row.password_hash,
            roles: split_roles(&row.roles),
        }
    }
}

#[derive(Clone)]
pub struct CredentialRepository {
    pool: SqlitePool,
}

impl CredentialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, username: &str) -> DbErrorResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT username, password_hash, roles FROM auth_users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Credential::from))
    }

    /// `INSERT OR IGNORE`, then read back whatever holds the username.
    pub async fn insert_or_get(&self, credential: &Credential) -> DbErrorResult<Credential> {
        let roles = join_roles(&credential.roles);
        let created_at = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
                INSERT OR IGNORE INTO auth_users (username, password_hash, roles, created_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&credential.username)
        .bind(&credential.password_hash)
        .bind(&roles)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        self.find(&credential.username)
            .await?
            .ok_or_else(|| DbError::Initialization {
                message: format!("credential {} vanished after insert", credential.username),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[async_trait]
impl CredentialStore for CredentialRepository {
    async fn find_by_username(&self, username: &str) -> AuthErrorResult<Option<Credential>> {
        self.find(username).await.map_err(store_error)
    }

    async fn insert_if_absent(&self, credential: &Credential) -> AuthErrorResult<Credential> {
        self.insert_or_get(credential).await.map_err(store_error)
    }
}

#[track_caller]
fn store_error(e: DbError) -> AuthError {
    AuthError::Store {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
