//! Command-line interface for tictactoe_server.

use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tictactoe_server::{ConfigError, ServerConfig};

/// Tic-tac-toe server - plays first against remote players over UDP
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "Datagram tic-tac-toe server playing optimal first moves", long_about = None)]
#[command(version)]
pub struct Cli {
    /// UDP port to listen on (overrides the config file)
    pub port: Option<u16>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Local address to bind to
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Maximum number of simultaneous games
    #[arg(long)]
    pub max_games: Option<u8>,

    /// Seconds a player may stay silent before their game is reset
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Protocol version to accept and send
    #[arg(long)]
    pub protocol_version: Option<u8>,
}

impl Cli {
    /// Builds the effective config: file (or defaults), then flags, then validation.
    pub fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(bind) = self.bind {
            config = config.with_bind_address(bind);
        }
        if let Some(max_games) = self.max_games {
            config = config.with_max_games(max_games);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        if let Some(version) = self.protocol_version {
            config = config.with_protocol_version(version);
        }

        config.validate()?;
        Ok(config)
    }
}
