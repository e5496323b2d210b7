//! Fixed-size datagram format and validation.
//!
//! Every datagram is four single-byte fields:
//!
//! | byte | field     | meaning                                        |
//! |------|-----------|------------------------------------------------|
//! | 0    | `version` | must equal the server's protocol version       |
//! | 1    | `command` | `0` = NEW_GAME, `1` = MOVE                     |
//! | 2    | `data`    | MOVE: ASCII digit `'1'..='9'`; otherwise unused |
//! | 3    | `session` | MOVE: 1-based game number; otherwise unused     |

use derive_more::{Display, Error};
use derive_new::new;
use tictactoe_core::Position;
use tracing::instrument;

/// Size of every datagram on the wire.
pub const DATAGRAM_LEN: usize = 4;

/// Player command carried in byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[repr(u8)]
pub enum Command {
    /// Ask the server to start a game.
    #[strum(serialize = "NEW_GAME")]
    NewGame = 0,
    /// Submit (or, from the server, announce) a move.
    #[strum(serialize = "MOVE")]
    Move = 1,
}

impl Command {
    /// Decodes the command byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Command::NewGame),
            1 => Some(Command::Move),
            _ => None,
        }
    }
}

/// A validated datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Datagram {
    /// Protocol version.
    pub version: u8,
    /// Player command.
    pub command: Command,
    /// Command payload (the move digit for MOVE).
    pub data: u8,
    /// 1-based game number (MOVE only).
    pub session: u8,
}

impl Datagram {
    /// Builds the server's MOVE announcement for a game.
    pub fn reply(version: u8, session: u8, position: Position) -> Self {
        Self::new(version, Command::Move, position.to_digit(), session)
    }

    /// Serializes into the wire layout.
    pub fn encode(&self) -> [u8; DATAGRAM_LEN] {
        [self.version, self.command as u8, self.data, self.session]
    }
}

/// Values a datagram is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ProtocolLimits {
    /// Only supported protocol version.
    pub version: u8,
    /// Highest valid game number.
    pub max_games: u8,
}

/// Reasons a datagram is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    /// Zero-length datagram.
    #[display("Received empty datagram")]
    Empty,
    /// Fewer bytes than the fixed layout needs.
    #[display("Datagram too short: {} of {} bytes", len, DATAGRAM_LEN)]
    Truncated {
        /// Bytes received.
        len: usize,
    },
    /// Version byte does not match.
    #[display("Protocol version {} not supported (expected {})", found, expected)]
    UnsupportedVersion {
        /// Version sent by the peer.
        found: u8,
        /// Version the server speaks.
        expected: u8,
    },
    /// Command byte is neither NEW_GAME nor MOVE.
    #[display("Invalid command {}", _0)]
    UnknownCommand(#[error(not(source))] u8),
    /// MOVE names a game outside the roster.
    #[display("Invalid game number {} (valid: 1-{})", found, max)]
    InvalidSessionId {
        /// Game number sent by the peer.
        found: u8,
        /// Roster size.
        max: u8,
    },
}

/// Validates raw bytes into a [`Datagram`].
///
/// Checks run in order: length, version, command, and (for anything other
/// than NEW_GAME) the game number. Bytes past [`DATAGRAM_LEN`] are ignored.
#[instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8], limits: ProtocolLimits) -> Result<Datagram, DecodeError> {
    let [version, command, data, session] = match bytes {
        [] => return Err(DecodeError::Empty),
        [version, command, data, session, ..] => [*version, *command, *data, *session],
        short => return Err(DecodeError::Truncated { len: short.len() }),
    };

    if version != limits.version {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            expected: limits.version,
        });
    }

    let command = Command::from_byte(command).ok_or(DecodeError::UnknownCommand(command))?;

    if command != Command::NewGame && !(1..=limits.max_games).contains(&session) {
        return Err(DecodeError::InvalidSessionId {
            found: session,
            max: limits.max_games,
        });
    }

    Ok(Datagram::new(version, command, data, session))
}
