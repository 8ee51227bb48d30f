//! Configuration for the admin CLI

use core_config::store::StoreConfig;
use core_config::{ConfigError, Environment, FromEnv};

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub store: StoreConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            store: StoreConfig::from_env()?,
        })
    }
}
