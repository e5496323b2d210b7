//! Server configuration.

use crate::protocol::ProtocolLimits;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings the server loop and its transport start from.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Deserialize)]
#[setters(prefix = "with_")]
pub struct ServerConfig {
    /// Local address to bind.
    #[serde(default = "default_bind_address")]
    bind_address: IpAddr,

    /// UDP port to listen on.
    #[serde(default = "default_port")]
    port: u16,

    /// Only protocol version accepted and sent.
    #[serde(default = "default_protocol_version")]
    protocol_version: u8,

    /// Per-game inactivity budget, and the receive wait, in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Number of games that can run at once.
    #[serde(default = "default_max_games")]
    max_games: u8,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

fn default_protocol_version() -> u8 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_games() -> u8 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            protocol_version: default_protocol_version(),
            timeout_secs: default_timeout_secs(),
            max_games: default_max_games(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file; missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(port = config.port, max_games = config.max_games, "Config loaded successfully");
        Ok(config)
    }

    /// Rejects values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::new("port must be between 1 and 65535".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("timeout_secs must be at least 1".to_string()));
        }
        if self.max_games == 0 {
            return Err(ConfigError::new("max_games must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Per-game budget and receive wait.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Values incoming datagrams are checked against.
    pub fn limits(&self) -> ProtocolLimits {
        ProtocolLimits::new(self.protocol_version, self.max_games)
    }

    /// Address the socket binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
