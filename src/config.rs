use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://todos.db".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: 5,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr.parse().with_context(|| format!("invalid BIND_ADDR: {addr}"))?;
        }
        if let Some(n) = lookup("DB_MAX_CONNECTIONS") {
            config.max_connections = n.parse().with_context(|| format!("invalid DB_MAX_CONNECTIONS: {n}"))?;
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().with_context(|| format!("invalid REQUEST_TIMEOUT_SECS: {secs}"))?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
