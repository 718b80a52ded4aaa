use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::store::{ConnectionMode, PgStoreConfig};
use crate::utils::RetryConfig;

// ============================================================================
// Configuration
// ============================================================================
//
// Every setting can come from the command line or the environment. `main`
// loads a `.env` file before parsing, so local overrides live there.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectionStrategy {
    /// Open and close a connection around every store operation
    PerCall,
    /// Reuse connections from a bounded pool
    Pooled,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "restaurant_orders", about = "Restaurant order-taking web server")]
pub struct Config {
    /// Port the HTTP server listens on
    #[arg(env = "PORT")]
    pub port: u16,

    /// JSON menu file ({"itemsList": [{"name": ..., "cost": ...}]})
    #[arg(env = "MENU_FILE")]
    pub menu_file: PathBuf,

    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "ORDER_STORE", value_enum, default_value_t = StoreBackend::Postgres)]
    pub store: StoreBackend,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Table holding order documents
    #[arg(long, env = "ORDERS_COLLECTION", default_value = "orders")]
    pub collection: String,

    #[arg(long, env = "ORDER_STORE_CONNECTIONS", value_enum, default_value_t = ConnectionStrategy::PerCall)]
    pub connections: ConnectionStrategy,

    #[arg(long, env = "ORDER_STORE_POOL_SIZE", default_value_t = 5)]
    pub pool_size: u32,

    #[arg(long, env = "ORDER_STORE_CONNECT_TIMEOUT_SECS", default_value_t = 5)]
    pub connect_timeout_secs: u64,

    #[arg(long, env = "ORDER_STORE_CONNECT_ATTEMPTS", default_value_t = 3)]
    pub connect_attempts: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is required when ORDER_STORE=postgres")]
    MissingDatabaseUrl,
}

/// Resolved store selection.
#[derive(Debug, Clone)]
pub enum StoreSettings {
    Memory,
    Postgres(PgStoreConfig),
}

impl Config {
    pub fn store_settings(&self) -> Result<StoreSettings, ConfigError> {
        match self.store {
            StoreBackend::Memory => Ok(StoreSettings::Memory),
            StoreBackend::Postgres => {
                let database_url = self
                    .database_url
                    .clone()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::MissingDatabaseUrl)?;

                let mode = match self.connections {
                    ConnectionStrategy::PerCall => ConnectionMode::PerCall,
                    ConnectionStrategy::Pooled => ConnectionMode::Pooled {
                        max_connections: self.pool_size,
                    },
                };

                Ok(StoreSettings::Postgres(PgStoreConfig {
                    database_url,
                    collection: self.collection.clone(),
                    mode,
                    connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                    retry: RetryConfig::with_attempts(self.connect_attempts),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_port_and_menu() {
        let config = Config::try_parse_from([
            "restaurant_orders",
            "5000",
            "menu.json",
            "--store",
            "memory",
        ])
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.menu_file, PathBuf::from("menu.json"));
        assert!(matches!(config.store_settings().unwrap(), StoreSettings::Memory));
    }

    #[test]
    fn test_pooled_postgres_settings() {
        let config = Config::try_parse_from([
            "restaurant_orders",
            "5000",
            "menu.json",
            "--store",
            "postgres",
            "--database-url",
            "postgres://localhost/restaurant",
            "--connections",
            "pooled",
            "--pool-size",
            "8",
            "--connect-attempts",
            "4",
        ])
        .unwrap();

        let StoreSettings::Postgres(pg) = config.store_settings().unwrap() else {
            panic!("expected postgres settings");
        };
        assert_eq!(pg.mode, ConnectionMode::Pooled { max_connections: 8 });
        assert_eq!(pg.retry.max_attempts, 4);
        assert_eq!(pg.database_url, "postgres://localhost/restaurant");
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let mut config = Config::try_parse_from([
            "restaurant_orders",
            "5000",
            "menu.json",
            "--store",
            "postgres",
        ])
        .unwrap();
        config.database_url = None;

        assert!(matches!(
            config.store_settings(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Config::try_parse_from(["restaurant_orders", "not-a-port", "menu.json"]).is_err());
    }
}
