//! Environment-driven server configuration

use std::net::{IpAddr, Ipv4Addr};

/// Server configuration
///
/// Environment variables:
/// - `PORT` — HTTP listen port (default 8080)
/// - `BIND_ADDR` — listen address (default 0.0.0.0)
/// - `SNAPSHOT_PATH` — JSON cluster snapshot to serve; empty snapshot when
///   unset
/// - `RUST_LOG` — log filter, consumed by tracing-subscriber
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Listen address
    pub bind_addr: IpAddr,

    /// Optional path to a JSON cluster snapshot
    pub snapshot_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            snapshot_path: None,
        }
    }
}

impl ApiConfig {
    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bind_addr);

        let snapshot_path = std::env::var("SNAPSHOT_PATH").ok().filter(|s| !s.is_empty());

        Self {
            port,
            bind_addr,
            snapshot_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert!(config.snapshot_path.is_none());
    }
}
