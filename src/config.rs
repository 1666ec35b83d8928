use std::net::SocketAddr;
use std::str::FromStr;

use crate::domain::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Which tasks the time-summary endpoints add up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryScope {
    /// Only the requesting user's tasks.
    #[default]
    Caller,
    /// Every task in the store, whoever asks.
    Global,
}

impl SummaryScope {
    pub fn owner(self, caller: UserId) -> Option<UserId> {
        match self {
            Self::Caller => Some(caller),
            Self::Global => None,
        }
    }
}

impl FromStr for SummaryScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caller" => Ok(Self::Caller),
            "global" => Ok(Self::Global),
            other => Err(ConfigError::InvalidValue {
                key: "SUMMARY_SCOPE",
                message: format!("expected `caller` or `global`, got `{other}`"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub summary_scope: SummaryScope,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue { key: "PORT", message: format!("{e}") })?,
            None => 3000,
        };
        let summary_scope = match lookup("SUMMARY_SCOPE") {
            Some(raw) => raw.parse()?,
            None => SummaryScope::default(),
        };
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://tasktime.db".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            summary_scope,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue { key: "HOST", message: format!("{e}") })
    }
}
