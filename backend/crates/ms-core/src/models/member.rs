//! Member entity managed by the member service.

use crate::MemberStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    /// Unique login-style handle (3-50 chars)
    pub username: String,
    pub password_hash: String,
    /// Unique contact address
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Fields supplied when registering a member; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub status: MemberStatus,
}
