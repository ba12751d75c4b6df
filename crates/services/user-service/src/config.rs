//! User service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// Document database connection
    pub database: DatabaseConfig,
    /// Salt applied to new users' passwords
    pub salt: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("USER_SERVICE_LOG_LEVEL")
                    .unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                name: env::var("USER_SERVICE_DATABASE_NAME")
                    .unwrap_or(defaults.database.name),
                max_pool_size: env::var("USER_SERVICE_MAX_POOL_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_pool_size),
                min_pool_size: env::var("USER_SERVICE_MIN_POOL_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_pool_size),
            },
            salt: env::var("SALT").unwrap_or_default(),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseConfig::default(),
            salt: String::new(),
        }
    }
}
