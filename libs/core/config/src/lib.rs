//! Environment-driven configuration shared by the dashboard crates.
//!
//! Every config struct implements [`FromEnv`] and falls back to defaults that
//! work on a developer machine. Binaries call [`tracing::init_tracing`] once
//! the [`Environment`] is known.

pub mod store;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment environment, selected by `APP_ENV`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything other than "production" (case-insensitive) is development
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read an environment variable, falling back to `default` when unset
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable that has no sensible default
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Read and parse an environment variable, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error rather than a silent default.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("DASHBOARD_TEST_VAR", Some("set"), || {
            assert_eq!(env_or_default("DASHBOARD_TEST_VAR", "fallback"), "set");
        });
        temp_env::with_var_unset("DASHBOARD_TEST_VAR", || {
            assert_eq!(env_or_default("DASHBOARD_TEST_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("DASHBOARD_REQUIRED", || {
            let err = env_required("DASHBOARD_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("DASHBOARD_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_or_uses_default_when_unset() {
        temp_env::with_var_unset("DASHBOARD_LIMIT", || {
            assert_eq!(env_parse_or("DASHBOARD_LIMIT", 50usize).unwrap(), 50);
        });
    }

    #[test]
    fn test_env_parse_or_parses_value() {
        temp_env::with_var("DASHBOARD_LIMIT", Some(" 25 "), || {
            assert_eq!(env_parse_or("DASHBOARD_LIMIT", 50usize).unwrap(), 25);
        });
    }

    #[test]
    fn test_env_parse_or_rejects_garbage() {
        temp_env::with_var("DASHBOARD_LIMIT", Some("many"), || {
            let err = env_parse_or("DASHBOARD_LIMIT", 50usize).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "DASHBOARD_LIMIT"));
        });
    }
}
