mod auth_config;
mod circuit_breaker_config;
mod config;
mod database_config;
mod error;
mod gateway_config;
mod log_level;
mod logging_config;
mod member_client_config;
mod server_config;
mod service_name;

pub use auth_config::{AuthConfig, SeedUser};
pub use circuit_breaker_config::CircuitBreakerConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use gateway_config::{GatewayConfig, RouteConfig};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use member_client_config::MemberClientConfig;
pub use server_config::ServerConfig;
pub use service_name::ServiceName;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "MS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".ms";
const SHARED_CONFIG_FILE: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_ACCESS_TOKEN_VALIDITY_SECS: i64 = 3600;
const MIN_ACCESS_TOKEN_VALIDITY_SECS: i64 = 1;
const MAX_ACCESS_TOKEN_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

const DEFAULT_MEMBER_SERVICE_URL: &str = "http://127.0.0.1:8082";
