use crate::{ConfigError, ConfigErrorResult, DEFAULT_MEMBER_SERVICE_URL};

use serde::Deserialize;

/// Where order-service finds member-service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemberClientConfig {
    pub base_url: String,
}

impl Default for MemberClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_MEMBER_SERVICE_URL),
        }
    }
}

impl MemberClientConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::config(format!(
                "member_client.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
