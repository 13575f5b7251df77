//! Configuration loaded from environment variables.

use std::env;

/// Contact book configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database URL.
    pub database_url: String,
    /// Maximum pooled database connections.
    pub pool_size: u32,
}

impl Config {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite:contacts.db?mode=rwc";
    pub const DEFAULT_POOL_SIZE: u32 = 5;

    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `CONTACTS_DATABASE_URL` | SQLite database URL | `sqlite:contacts.db?mode=rwc` |
    /// | `CONTACTS_POOL_SIZE` | Connection pool size | `5` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("CONTACTS_DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.to_string());

        if !database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidDatabaseUrl(database_url));
        }

        let pool_size = match lookup("CONTACTS_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidPoolSize(raw)),
            },
            None => Self::DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            pool_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: Self::DEFAULT_DATABASE_URL.to_string(),
            pool_size: Self::DEFAULT_POOL_SIZE,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CONTACTS_DATABASE_URL must be a sqlite: URL, got {0:?}")]
    InvalidDatabaseUrl(String),

    #[error("CONTACTS_POOL_SIZE must be a positive integer, got {0:?}")]
    InvalidPoolSize(String),
}
