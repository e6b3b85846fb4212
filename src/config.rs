//! Runtime settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/bookshelf";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
    /// Serve the GraphiQL explorer on `GET /graphql`.
    pub graphiql: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or("HOST", lookup("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let store = if database_url.eq_ignore_ascii_case(MEMORY_DATABASE_URL) {
            StoreConfig::Memory
        } else {
            StoreConfig::Postgres {
                database_url,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            }
        };
        let graphiql = match lookup("GRAPHIQL") {
            None => true,
            Some(v) => parse_bool("GRAPHIQL", &v)?,
        };
        Ok(AppConfig {
            host,
            port,
            store,
            graphiql,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: v }),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert!(cfg.graphiql);
        assert_eq!(
            cfg.store,
            StoreConfig::Postgres {
                database_url: DEFAULT_DATABASE_URL.into(),
                max_connections: 5,
            }
        );
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn port_and_memory_store() {
        let cfg = config(&[("PORT", "8080"), ("DATABASE_URL", "memory"), ("GRAPHIQL", "off")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.store, StoreConfig::Memory);
        assert!(!cfg.graphiql);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }
}
