use ms_web::FieldErrors;

use serde::Deserialize;

/// Body of `POST /auth/login`. Absent fields deserialize as blank so they
/// are reported per field instead of as a parse error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> ms_web::ApiResult<()> {
        let mut errors = FieldErrors::new();
        errors.require_not_blank("username", &self.username);
        errors.require_not_blank("password", &self.password);
        errors.finish()
    }
}
