//! NEW_GAME and MOVE semantics for a single session.
//!
//! The server is always the first player. A session is either free or in
//! play, and in play always means "waiting on the bound peer's move"; the
//! server's own reply is computed and sent inside the same handler.

use crate::protocol::Datagram;
use crate::session::{Session, SessionId};
use crate::transport::Transport;
use derive_more::{Display, Error};
use std::net::SocketAddr;
use tictactoe_core::{GameStatus, PlaceError, Player, Position, find_best_move};
use tracing::{debug, error, info, instrument, warn};

/// What a command did to the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A free slot was bound to the peer and the opening move sent.
    Started {
        /// Game that started.
        session: SessionId,
        /// Server's opening move.
        opening: Position,
    },
    /// Peer moved, server replied, game goes on.
    Continued {
        /// Game that advanced.
        session: SessionId,
        /// Server's reply.
        reply: Position,
    },
    /// The game reached a win or draw and the slot was freed.
    Finished {
        /// Game that ended.
        session: SessionId,
        /// Terminal board status.
        outcome: GameStatus,
        /// Server's final move, if the server moved last.
        reply: Option<Position>,
    },
    /// The peer sent an illegal move and lost the slot.
    Forfeited {
        /// Game that was reset.
        session: SessionId,
        /// Why the move was illegal.
        reason: MoveError,
    },
    /// MOVE came from an address not bound to the game; nothing changed.
    Rejected {
        /// Game the command targeted.
        session: SessionId,
    },
    /// NEW_GAME arrived while every slot was taken; nothing changed.
    Unavailable,
    /// The server's move could not be produced or delivered; the game was reset.
    Aborted {
        /// Game that was reset.
        session: SessionId,
    },
}

/// Why a peer's move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Payload is not an ASCII digit `'1'..='9'`.
    #[display("Invalid move: must be a number [1-9], got byte {}", _0)]
    OutOfRange(#[error(not(source))] u8),
    /// The square already holds a mark.
    #[display("Invalid move: square {} already taken", _0)]
    Occupied(#[error(not(source))] Position),
}

impl From<PlaceError> for MoveError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::Occupied(pos) => MoveError::Occupied(pos),
        }
    }
}

/// Runs commands against sessions, replying through a transport.
#[derive(Debug)]
pub struct GameMachine<'a, T: ?Sized> {
    transport: &'a T,
    version: u8,
}

impl<'a, T: Transport + ?Sized> GameMachine<'a, T> {
    /// Creates a machine that stamps replies with `version`.
    pub fn new(transport: &'a T, version: u8) -> Self {
        Self { transport, version }
    }

    /// Handles NEW_GAME; `slot` is the free slot the roster offered, if any.
    #[instrument(skip(self, slot))]
    pub async fn new_game(&self, slot: Option<&mut Session>, peer: SocketAddr) -> Transition {
        info!(%peer, "Player issued a NEW_GAME command");
        let Some(session) = slot else {
            warn!(%peer, "Unable to find an open game");
            return Transition::Unavailable;
        };

        session.bind(peer);
        let opening = match self.reply(session, peer).await {
            Ok(position) => position,
            Err(transition) => return transition,
        };

        session.set_turn(Player::Second);
        debug!(session = %session.id(), "Board after opening:\n{}", session.board());
        Transition::Started {
            session: *session.id(),
            opening,
        }
    }

    /// Handles MOVE from `peer` carrying the wire digit `data`.
    #[instrument(skip(self, session), fields(session = %session.id()))]
    pub async fn play_move(
        &self,
        session: &mut Session,
        peer: SocketAddr,
        data: u8,
    ) -> Transition {
        let id = *session.id();
        info!(%peer, "Player issued a MOVE command");

        if !session.is_bound_to(peer) {
            warn!(
                %peer,
                bound = ?session.peer(),
                "Player address does not match that registered to game"
            );
            return Transition::Rejected { session: id };
        }

        let placed = Position::from_digit(data)
            .ok_or(MoveError::OutOfRange(data))
            .and_then(|pos| {
                session.board_mut().place(pos, Player::Second)?;
                Ok(pos)
            });
        let position = match placed {
            Ok(position) => position,
            Err(reason) => {
                warn!(%reason, "Player forfeits the game");
                session.reset();
                return Transition::Forfeited {
                    session: id,
                    reason,
                };
            }
        };
        info!(position = %position, "Player 2 chose a move");

        if let Some(finished) = conclude(session, None) {
            return finished;
        }

        session.set_turn(Player::First);
        let reply = match self.reply(session, peer).await {
            Ok(position) => position,
            Err(transition) => return transition,
        };

        if let Some(finished) = conclude(session, Some(reply)) {
            return finished;
        }

        session.set_turn(Player::Second);
        debug!("Board after exchange:\n{}", session.board());
        Transition::Continued { session: id, reply }
    }

    /// Picks, sends and records the server's move.
    async fn reply(&self, session: &mut Session, peer: SocketAddr) -> Result<Position, Transition> {
        let id = *session.id();
        let chosen = find_best_move(session.board()).and_then(|pos| {
            session.board_mut().place(pos, Player::First).ok()?;
            Some(pos)
        });
        let Some(position) = chosen else {
            error!(session = %id, "No square available for the server's move");
            session.reset();
            return Err(Transition::Aborted { session: id });
        };

        let datagram = Datagram::reply(self.version, id.get(), position);
        if let Err(e) = self.transport.send(&datagram.encode(), peer).await {
            error!(session = %id, %peer, error = %e, "Failed to send move");
            session.reset();
            return Err(Transition::Aborted { session: id });
        }

        info!(session = %id, position = %position, "Server sent a move");
        Ok(position)
    }
}

/// Announces and frees a game whose board is terminal.
fn conclude(session: &mut Session, reply: Option<Position>) -> Option<Transition> {
    let outcome = session.board().status();
    if !outcome.is_terminal() {
        return None;
    }

    let id = *session.id();
    info!(session = %id, %outcome, "Game over\n{}", session.board());
    session.reset();
    Some(Transition::Finished {
        session: id,
        outcome,
        reply,
    })
}
