//! Process settings from the environment (and an optional `.env`).

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/pizzeria";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub backend: StoreBackend,
    /// Insert sample restaurants and pizzas into empty tables on startup.
    pub seed: bool,
    pub body_limit: usize,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DB_MAX_CONNECTIONS",
                        value: v,
                        reason: "expected a positive integer",
                    })
                }
            },
        };

        let backend = match get("STORE_BACKEND") {
            None => StoreBackend::Postgres,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "postgres" => StoreBackend::Postgres,
                "memory" => StoreBackend::Memory,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "STORE_BACKEND",
                        value: v,
                        reason: "expected 'postgres' or 'memory'",
                    })
                }
            },
        };

        let seed = match get("SEED_DATA") {
            None => false,
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue {
                key: "SEED_DATA",
                value: v,
                reason: "expected true/false",
            })?,
        };

        let body_limit = match get("REQUEST_BODY_LIMIT") {
            None => DEFAULT_BODY_LIMIT,
            Some(v) => v.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                key: "REQUEST_BODY_LIMIT",
                value: v.clone(),
                reason: "expected a byte count",
            })?,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            max_connections,
            backend,
            seed,
            body_limit,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
