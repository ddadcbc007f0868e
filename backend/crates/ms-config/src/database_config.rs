use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file relative to the config directory; unset means `<service>.db`
    pub path: Option<String>,
}
