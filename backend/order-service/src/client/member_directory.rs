use crate::client::error::Result as ClientResult;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_MEMBER_STATUS: &str = "UNKNOWN";
pub const FALLBACK_HEALTH_SERVICE: &str = "member-service-fallback";

/// Member as seen from the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub status_description: String,
}

impl MemberRecord {
    /// Placeholder returned when member-service cannot answer.
    pub fn unavailable(id: i64) -> Self {
        Self {
            id,
            username: format!("unknown-user-{}", id),
            email: "unknown@example.com".to_string(),
            full_name: "Unknown User".to_string(),
            phone_number: Some("000-0000-0000".to_string()),
            status: UNKNOWN_MEMBER_STATUS.to_string(),
            status_description: "Service temporarily unavailable".to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.status == UNKNOWN_MEMBER_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberHealth {
    pub status: String,
    pub service: String,
}

impl MemberHealth {
    pub fn unavailable() -> Self {
        Self {
            status: "DOWN".to_string(),
            service: FALLBACK_HEALTH_SERVICE.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.service == FALLBACK_HEALTH_SERVICE
    }
}

/// Remote lookups against member-service.
///
/// Implementations report every non-success as an error; substituting
/// placeholders is the caller's job.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// `authorization` is the caller's raw `Authorization` header, forwarded as-is.
    async fn member_by_id(&self, id: i64, authorization: Option<&str>) -> ClientResult<MemberRecord>;

    async fn health(&self) -> ClientResult<MemberHealth>;
}
