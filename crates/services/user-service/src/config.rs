//! User service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// Default HTTP port of the user service
pub const DEFAULT_PORT: u16 = 8080;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Bind address and service name
    pub service: ServiceConfig,
    /// PostgreSQL settings; `None` keeps users in memory
    pub database: Option<DatabaseConfig>,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database = env::var("USER_SERVICE_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                max_connections: env::var("USER_SERVICE_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                ..DatabaseConfig::with_url(url)
            });

        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                host: env::var("USER_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("USER_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
            },
            database,
        }
    }

    /// Override the bind address (CLI flags win over the environment).
    pub fn with_addr(mut self, host: impl Into<String>, port: u16) -> Self {
        self.service.host = host.into();
        self.service.port = port;
        self
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                ..ServiceConfig::default()
            },
            database: None,
        }
    }
}
