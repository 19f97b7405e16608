use std::{env, fmt::Display, str::FromStr};

use log::*;
use oms_common::parse_boolean_flag;

const DEFAULT_OMS_HOST: &str = "127.0.0.1";
const DEFAULT_OMS_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/oms_store.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The maximum number of connections in the database pool.
    pub max_connections: u32,
    /// If true, pending database migrations are applied before the server starts accepting requests.
    pub run_migrations: bool,
    /// If true, the demo products are added to the catalog at startup. Products that already exist (by name) are
    /// left alone.
    pub seed_demo_products: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OMS_HOST.to_string(),
            port: DEFAULT_OMS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
            seed_demo_products: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("OMS_HOST").ok().unwrap_or_else(|| DEFAULT_OMS_HOST.into());
        let port = parse_or_default("OMS_PORT", env::var("OMS_PORT").ok(), DEFAULT_OMS_PORT);
        let database_url = env::var("OMS_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ OMS_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections =
            parse_or_default("OMS_DB_MAX_CONNECTIONS", env::var("OMS_DB_MAX_CONNECTIONS").ok(), DEFAULT_MAX_CONNECTIONS);
        let max_connections = if max_connections == 0 {
            warn!("🪛️ OMS_DB_MAX_CONNECTIONS must be at least 1. Using the default, {DEFAULT_MAX_CONNECTIONS}, instead.");
            DEFAULT_MAX_CONNECTIONS
        } else {
            max_connections
        };
        let run_migrations = parse_boolean_flag(env::var("OMS_RUN_MIGRATIONS").ok(), true);
        let seed_demo_products = parse_boolean_flag(env::var("OMS_SEED_DEMO_PRODUCTS").ok(), false);
        Self { host, port, database_url, max_connections, run_migrations, seed_demo_products }
    }
}

/// Parses `value`, falling back to `default` (with a warning) if it is missing or malformed.
fn parse_or_default<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value {
        None => default,
        Some(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8360);
        assert_eq!(config.database_url, "sqlite://data/oms_store.db");
        assert_eq!(config.max_connections, 25);
        assert!(config.run_migrations);
        assert!(!config.seed_demo_products);
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_connections, 25);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        assert_eq!(parse_or_default("OMS_PORT", Some("8080".into()), 8360u16), 8080);
        assert_eq!(parse_or_default("OMS_PORT", Some(" 8081 ".into()), 8360u16), 8081);
        assert_eq!(parse_or_default("OMS_PORT", Some("eighty".into()), 8360u16), 8360);
        assert_eq!(parse_or_default("OMS_PORT", Some("70000".into()), 8360u16), 8360);
        assert_eq!(parse_or_default("OMS_DB_MAX_CONNECTIONS", None, 25u32), 25);
    }
}
