use ms_core::MemberStatus;
use ms_db::MemberUpdate;
use ms_web::{ApiResult, FieldErrors};

use serde::Deserialize;

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<String>,
}

impl UpdateMemberRequest {
    /// Validate and convert into the repository's update set.
    pub fn into_update(self) -> ApiResult<MemberUpdate> {
        let mut errors = FieldErrors::new();

        if let Some(full_name) = &self.full_name {
            errors.check_max_length("fullName", full_name, 100);
        }
        if let Some(phone) = &self.phone_number {
            errors.check_max_length("phoneNumber", phone, 20);
        }

        let status = match self.status.as_deref().map(str::parse::<MemberStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(_)) => {
                errors.add("status", "status must be one of ACTIVE, INACTIVE, SUSPENDED");
                None
            }
            None => None,
        };

        errors.finish()?;

        Ok(MemberUpdate {
            full_name: self.full_name,
            phone_number: self.phone_number,
            status,
        })
    }
}
