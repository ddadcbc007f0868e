use crate::{
    AuthConfig, CONFIG_DIR_ENV, CircuitBreakerConfig, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, DatabaseConfig, GatewayConfig, LoggingConfig, MemberClientConfig,
    SHARED_CONFIG_FILE, ServerConfig, ServiceName,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use toml::{Table, Value};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Process this configuration was loaded for
    #[serde(skip)]
    pub service: ServiceName,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub gateway: GatewayConfig,
    pub member_client: MemberClientConfig,
}

impl Config {
    /// Load config for one service.
    ///
    /// Loading order:
    /// 0. Export variables from `./.env`, if present (existing env wins)
    /// 1. Check for MS_CONFIG_DIR env var, else use ./.ms/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Read the shared config.toml, if present
    /// 4. Merge `<service>.toml` over it, if present
    /// 5. Apply MS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(service: ServiceName) -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let mut merged = Table::new();
        for file in [
            SHARED_CONFIG_FILE.to_string(),
            format!("{}.toml", service.as_str()),
        ] {
            let path = config_dir.join(file);
            if path.exists() {
                merge_tables(&mut merged, Self::load_table(&path)?);
            }
        }

        let mut config: Config = Value::Table(merged)
            .try_into()
            .map_err(|e| ConfigError::Toml {
                path: config_dir.clone(),
                source: e,
            })?;
        config.service = service;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Read one TOML file with detailed error context.
    fn load_table(path: &Path) -> ConfigErrorResult<Table> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MS_CONFIG_DIR env var > ./.ms/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.circuit_breaker.validate()?;

        match self.service {
            ServiceName::Gateway => self.gateway.validate()?,
            ServiceName::Order => self.member_client.validate()?,
            ServiceName::Auth | ServiceName::Member => {}
        }

        // Validate database path doesn't escape config dir
        let database = self.database_file();
        if Path::new(&database).is_absolute() || database.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Configured port, or the service's default.
    pub fn port(&self) -> u16 {
        self.server
            .port
            .unwrap_or_else(|| self.service.default_port())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.port())
    }

    fn database_file(&self) -> String {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| self.service.default_database().to_string())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(self.database_file()))
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded for {}:", self.service);
        info!("  server: {}", self.bind_addr());

        if self.service != ServiceName::Gateway {
            info!("  database: {}", self.database_file());
        }

        info!(
            "  auth: HS256 secret {}, token validity={}s",
            if self.auth.jwt_secret.is_some() {
                "configured"
            } else {
                "MISSING"
            },
            self.auth.access_token_validity_secs
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  circuit_breaker: window={}, min_calls={}, threshold={}%, open={}s, half_open={}, timeout={}ms",
            self.circuit_breaker.sliding_window_size,
            self.circuit_breaker.minimum_number_of_calls,
            self.circuit_breaker.failure_rate_threshold,
            self.circuit_breaker.open_duration_secs,
            self.circuit_breaker.half_open_permitted_calls,
            self.circuit_breaker.call_timeout_ms
        );

        match self.service {
            ServiceName::Gateway => {
                info!("  gateway: allow_list={:?}", self.gateway.allow_list);
                for route in &self.gateway.routes {
                    info!(
                        "  route {}: {} -> {}{}",
                        route.id,
                        route.path_prefix,
                        route.upstream,
                        route.rewrite_prefix.as_deref().unwrap_or("")
                    );
                }
            }
            ServiceName::Order => info!("  member_client: {}", self.member_client.base_url),
            ServiceName::Auth => info!("  seed users: {}", self.auth.seed_users.len()),
            ServiceName::Member => {}
        }
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_option_parse("MS_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_option_string("MS_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("MS_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse(
            "MS_AUTH_ACCESS_TOKEN_VALIDITY_SECS",
            &mut self.auth.access_token_validity_secs,
        );

        // Logging
        Self::apply_env_parse("MS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MS_LOG_FILE", &mut self.logging.file);

        // Circuit Breaker
        Self::apply_env_parse(
            "MS_CB_SLIDING_WINDOW_SIZE",
            &mut self.circuit_breaker.sliding_window_size,
        );
        Self::apply_env_parse(
            "MS_CB_MINIMUM_NUMBER_OF_CALLS",
            &mut self.circuit_breaker.minimum_number_of_calls,
        );
        Self::apply_env_parse(
            "MS_CB_FAILURE_RATE_THRESHOLD",
            &mut self.circuit_breaker.failure_rate_threshold,
        );
        Self::apply_env_parse(
            "MS_CB_OPEN_DURATION_SECS",
            &mut self.circuit_breaker.open_duration_secs,
        );
        Self::apply_env_parse(
            "MS_CB_HALF_OPEN_PERMITTED_CALLS",
            &mut self.circuit_breaker.half_open_permitted_calls,
        );
        Self::apply_env_parse(
            "MS_CB_CALL_TIMEOUT_MS",
            &mut self.circuit_breaker.call_timeout_ms,
        );

        // Peer locations
        Self::apply_env_string("MS_MEMBER_SERVICE_URL", &mut self.member_client.base_url);
        for (var_name, route_id) in [
            ("MS_AUTH_SERVICE_URL", "auth-service"),
            ("MS_MEMBER_SERVICE_URL", "member-service"),
            ("MS_ORDER_SERVICE_URL", "order-service"),
        ] {
            if let Some(route) = self.gateway.routes.iter_mut().find(|r| r.id == route_id) {
                Self::apply_env_string(var_name, &mut route.upstream);
            }
        }
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for optional parseable values
    fn apply_env_option_parse<T: std::str::FromStr>(var_name: &str, target: &mut Option<T>) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = Some(parsed);
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

/// Deep-merge `overlay` into `base`; tables merge key by key, anything else replaces.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
