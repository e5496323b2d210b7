//! Tic-tac-toe datagram server.
//!
//! Binds a UDP socket and plays first in up to `max_games` concurrent games.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tictactoe_server::GameServer;
use tokio::net::UdpSocket;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    let socket = UdpSocket::bind(config.socket_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.socket_addr()))?;
    let local = socket.local_addr()?;
    info!(address = %local.ip(), port = local.port(), "Server socket created");
    info!(
        version = config.protocol_version(),
        max_games = config.max_games(),
        timeout_secs = config.timeout_secs(),
        "Server listening"
    );

    let mut server = GameServer::new(socket, config);
    tokio::select! {
        _ = server.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutting down");
        }
    }

    Ok(())
}
