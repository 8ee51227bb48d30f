use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::fmt;
use std::str::FromStr;

/// Default key the user collection is stored under
pub const DEFAULT_USERS_KEY: &str = "users";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Which backing store holds the registered users
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local; contents are lost on exit
    #[default]
    Memory,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(format!("unknown store backend '{}' (expected memory or redis)", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
        }
    }
}

/// Key-value store settings for the user registry
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
    pub users_key: String,
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Redis,
            redis_url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            users_key: DEFAULT_USERS_KEY.to_string(),
        }
    }
}

impl FromEnv for StoreConfig {
    /// Reads:
    /// - `STORE_BACKEND`: memory | redis (default: memory)
    /// - `REDIS_URL`: defaults to redis://127.0.0.1:6379
    /// - `USERS_KEY`: defaults to "users"
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_parse_or("STORE_BACKEND", StoreBackend::Memory)?;

        let users_key = env_or_default("USERS_KEY", DEFAULT_USERS_KEY);
        if users_key.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "USERS_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            backend,
            redis_url: env_or_default("REDIS_URL", DEFAULT_REDIS_URL),
            users_key,
        })
    }
}
