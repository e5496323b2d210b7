//! Datagram tic-tac-toe server.
//!
//! The server plays first in every game against remote peers, choosing its
//! moves with an exhaustive minimax search.
//!
//! # Architecture
//!
//! - **Protocol**: fixed four-byte datagram codec and validation
//! - **Session**: one game slot (board, bound peer, turn, time budget)
//! - **Roster**: fixed set of slots with eviction of silent peers
//! - **Machine**: NEW_GAME / MOVE semantics for a session
//! - **Server**: single-threaded receive/dispatch/expire loop over a [`Transport`]
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::{GameServer, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default().with_port(5050);
//! let socket = tokio::net::UdpSocket::bind(config.socket_addr()).await?;
//! GameServer::new(socket, config).run().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod machine;
mod protocol;
mod roster;
mod server;
mod session;
mod transport;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Wire protocol
pub use protocol::{Command, DATAGRAM_LEN, Datagram, DecodeError, ProtocolLimits, decode};

// Crate-level exports - Game slots
pub use roster::Roster;
pub use session::{Session, SessionId};

// Crate-level exports - State machine and loop
pub use machine::{GameMachine, MoveError, Transition};
pub use server::{GameServer, Step};

// Crate-level exports - Transport
pub use transport::{Received, Transport, TransportError};
