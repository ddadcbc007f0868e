use ms_core::{Member, MemberStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full member view; never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub status: MemberStatus,
    pub status_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            username: member.username,
            email: member.email,
            full_name: member.full_name,
            phone_number: member.phone_number,
            status: member.status,
            status_description: member.status.description().to_string(),
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// List entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberSummary {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            username: member.username,
            email: member.email,
            full_name: member.full_name,
            status: member.status,
            created_at: member.created_at,
        }
    }
}
