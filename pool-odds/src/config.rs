use crate::calculations::ModelParams;
use crate::error::ConfigError;
use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub model: ModelParams,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let defaults = ModelParams::default();
        let head_to_head_weight = parse_or(&lookup, "HEAD_TO_HEAD_WEIGHT", defaults.head_to_head_weight);
        if !(0.0..=1.0).contains(&head_to_head_weight) {
            return Err(ConfigError::Invalid {
                key: "HEAD_TO_HEAD_WEIGHT",
                message: format!("{} is outside [0, 1]", head_to_head_weight),
            });
        }

        let default_std_dev = parse_or(&lookup, "DEFAULT_MARGIN_STD_DEV", defaults.default_std_dev);
        if !(default_std_dev.is_finite() && default_std_dev > 0.0) {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_MARGIN_STD_DEV",
                message: format!("{} must be a positive number", default_std_dev),
            });
        }

        Ok(Self {
            port: parse_or(&lookup, "PORT", 5000),
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5),
            db_acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5),
            model: ModelParams {
                head_to_head_weight,
                default_std_dev,
                ..defaults
            },
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} '{}', defaulting to {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/pool")])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout_secs, 5);
        assert_eq!(config.model, ModelParams::default());
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[("PORT", "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/pool"),
            ("PORT", "not-a-port"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("HEAD_TO_HEAD_WEIGHT", "0.5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.model.head_to_head_weight, 0.5);
        assert_eq!(config.model.default_std_dev, 1.5);
    }

    #[test]
    fn test_weight_out_of_range() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/pool"),
            ("HEAD_TO_HEAD_WEIGHT", "1.5"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HEAD_TO_HEAD_WEIGHT", .. }));
    }
}
