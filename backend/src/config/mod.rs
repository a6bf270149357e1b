//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, pool sizing, token signing secret and lifetimes, password
//! hashing cost and the server port.

use anyhow::{Context, Result, bail};
use std::env;

/// Connection settings, the only part the migration runner needs.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl DatabaseConfig {
    /// Loads the database settings from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        Ok(DatabaseConfig {
            database_url,
            max_connections,
            acquire_timeout_seconds,
        })
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database = DatabaseConfig::from_env()?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let access_token_ttl_seconds = env::var("ACCESS_TOKEN_TTL_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .context("ACCESS_TOKEN_TTL_SECONDS must be a valid number")?;

        let refresh_token_ttl_seconds = env::var("REFRESH_TOKEN_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .context("REFRESH_TOKEN_TTL_SECONDS must be a valid number")?;

        if access_token_ttl_seconds == 0 || access_token_ttl_seconds >= refresh_token_ttl_seconds {
            bail!(
                "ACCESS_TOKEN_TTL_SECONDS ({}) must be non-zero and shorter than REFRESH_TOKEN_TTL_SECONDS ({})",
                access_token_ttl_seconds,
                refresh_token_ttl_seconds
            );
        }

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost);
        }

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database,
            jwt_secret,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            bcrypt_cost,
            server_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONAL_VARS: [&str; 6] = [
        "DB_MAX_CONNECTIONS",
        "DB_ACQUIRE_TIMEOUT_SECONDS",
        "ACCESS_TOKEN_TTL_SECONDS",
        "REFRESH_TOKEN_TTL_SECONDS",
        "BCRYPT_COST",
        "SERVER_PORT",
    ];

    fn with_env<F: FnOnce()>(overrides: &[(&str, Option<&str>)], f: F) {
        let mut vars: Vec<(&str, Option<&str>)> = vec![
            ("DATABASE_URL", Some("sqlite::memory:")),
            ("JWT_SECRET", Some("test-secret")),
        ];
        vars.extend(OPTIONAL_VARS.iter().map(|name| (*name, None)));
        for (name, value) in overrides {
            match vars.iter_mut().find(|(n, _)| *n == *name) {
                Some(entry) => entry.1 = *value,
                None => vars.push((*name, *value)),
            }
        }
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_defaults() {
        with_env(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.database.database_url, "sqlite::memory:");
            assert_eq!(config.database.max_connections, 5);
            assert_eq!(config.database.acquire_timeout_seconds, 3);
            assert_eq!(config.access_token_ttl_seconds, 300);
            assert_eq!(config.refresh_token_ttl_seconds, 86400);
            assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
            assert_eq!(config.server_port, 3000);
        });
    }

    #[test]
    fn test_overrides() {
        with_env(
            &[
                ("SERVER_PORT", Some("8080")),
                ("ACCESS_TOKEN_TTL_SECONDS", Some("60")),
                ("REFRESH_TOKEN_TTL_SECONDS", Some("3600")),
                ("BCRYPT_COST", Some("4")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server_port, 8080);
                assert_eq!(config.access_token_ttl_seconds, 60);
                assert_eq!(config.refresh_token_ttl_seconds, 3600);
                assert_eq!(config.bcrypt_cost, 4);
            },
        );
    }

    #[test]
    fn test_missing_secret() {
        with_env(&[("JWT_SECRET", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
        with_env(&[("JWT_SECRET", Some(""))], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_invalid_numbers() {
        with_env(&[("SERVER_PORT", Some("not-a-port"))], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("SERVER_PORT"));
        });
        with_env(&[("BCRYPT_COST", Some("2"))], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_database_config_without_secret() {
        with_env(
            &[("JWT_SECRET", None), ("DB_MAX_CONNECTIONS", Some("1"))],
            || {
                let database = DatabaseConfig::from_env().unwrap();
                assert_eq!(database.max_connections, 1);
                assert!(Config::from_env().is_err());
            },
        );
        with_env(&[("DATABASE_URL", None)], || {
            assert!(DatabaseConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_access_must_be_shorter_than_refresh() {
        with_env(
            &[
                ("ACCESS_TOKEN_TTL_SECONDS", Some("3600")),
                ("REFRESH_TOKEN_TTL_SECONDS", Some("3600")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
