//! Runtime configuration, read from the environment at start-up.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;

/// Settings for the HTTP server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

impl ApiConfig {
    /// Read `STOCKROOM_BIND_ADDR`, or `STOCKROOM_HOST` and `PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an arbitrary variable source.
    ///
    /// A full `STOCKROOM_BIND_ADDR` wins over the host/port pair.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(addr) = lookup("STOCKROOM_BIND_ADDR") {
            let bind_addr = addr
                .trim()
                .parse()
                .with_context(|| format!("STOCKROOM_BIND_ADDR is not a socket address: {addr:?}"))?;
            return Ok(Self { bind_addr });
        }

        let defaults = Self::default();
        let host = match lookup("STOCKROOM_HOST") {
            Some(host) => host
                .trim()
                .parse()
                .with_context(|| format!("STOCKROOM_HOST is not an IP address: {host:?}"))?,
            None => defaults.bind_addr.ip(),
        };
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port:?}"))?,
            None => defaults.bind_addr.port(),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
        })
    }
}
