use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const DEFAULT_RELAY_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
}

impl RelayConfig {
    /// Reads `RELAY_ADDR`, falling back to [`DEFAULT_RELAY_ADDR`].
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("RELAY_ADDR").unwrap_or_else(|_| DEFAULT_RELAY_ADDR.to_owned());
        Self::parse(&raw)
    }

    pub fn parse(addr: &str) -> Result<Self> {
        let bind_addr = addr
            .parse()
            .with_context(|| format!("Invalid relay address '{}'", addr))?;
        Ok(Self { bind_addr })
    }
}
