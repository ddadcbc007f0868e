use serde::Deserialize;

/// Which process is loading configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceName {
    #[default]
    Gateway,
    Auth,
    Member,
    Order,
}

impl ServiceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway-service",
            Self::Auth => "auth-service",
            Self::Member => "member-service",
            Self::Order => "order-service",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Gateway => 8000,
            Self::Auth => 8081,
            Self::Member => 8082,
            Self::Order => 8083,
        }
    }

    pub fn default_database(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway.db",
            Self::Auth => "auth.db",
            Self::Member => "member.db",
            Self::Order => "order.db",
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
