use ms_web::{ApiResult, FieldErrors, is_valid_email};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub phone_number: Option<String>,
}

impl CreateMemberRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();

        errors.require_not_blank("username", &self.username);
        errors.check_length("username", self.username.trim(), 3, 50);

        errors.require_not_blank("password", &self.password);
        errors.check(
            self.password.chars().count() >= 6,
            "password",
            "password must be at least 6 characters",
        );

        errors.require_not_blank("email", &self.email);
        errors.check(
            is_valid_email(self.email.trim()),
            "email",
            "email must be a valid address",
        );

        errors.check_max_length("fullName", &self.full_name, 100);
        if let Some(phone) = &self.phone_number {
            errors.check_max_length("phoneNumber", phone, 20);
        }

        errors.finish()
    }
}
