//! One roster slot's worth of game state.

use derive_getters::Getters;
use derive_more::Display;
use std::net::SocketAddr;
use std::time::Duration;
use tictactoe_core::{Board, Player};
use tracing::{debug, info, instrument};

/// Stable 1-based game number; equal to the slot's roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{}", _0)]
pub struct SessionId(u8);

impl SessionId {
    /// Wraps a 1-based game number; zero is not a game number.
    pub fn new(number: u8) -> Option<Self> {
        (number != 0).then_some(Self(number))
    }

    /// The game number as sent on the wire.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based roster index.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

/// A game slot.
///
/// A slot is free exactly when `turn` is `None`; a free slot has no peer,
/// an empty board and a full budget.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Game number.
    id: SessionId,
    /// Time left before the peer is evicted.
    remaining: Duration,
    /// Address of the bound second player.
    peer: Option<SocketAddr>,
    /// Whose move the session is waiting on.
    turn: Option<Player>,
    /// The game board.
    board: Board,
    /// Budget restored on every reset or refresh.
    #[getter(skip)]
    budget: Duration,
}

impl Session {
    /// Creates a free slot.
    pub fn new(id: SessionId, budget: Duration) -> Self {
        Self {
            id,
            remaining: budget,
            peer: None,
            turn: None,
            board: Board::new(),
            budget,
        }
    }

    /// True when no game occupies this slot.
    pub fn is_free(&self) -> bool {
        self.turn.is_none()
    }

    /// True if `addr` matches the bound peer's IP and port.
    pub fn is_bound_to(&self, addr: SocketAddr) -> bool {
        self.peer == Some(addr)
    }

    /// True once the budget is used up.
    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Binds a peer and clears the board; the server moves first.
    #[instrument(skip(self), fields(session = %self.id))]
    pub(crate) fn bind(&mut self, peer: SocketAddr) {
        info!(%peer, "Player assigned to game");
        self.peer = Some(peer);
        self.turn = Some(Player::First);
        self.board.reset();
        self.remaining = self.budget;
    }

    /// Sets whose move the game waits on.
    pub(crate) fn set_turn(&mut self, turn: Player) {
        self.turn = Some(turn);
    }

    /// Mutable access to the board for the state machine.
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Subtracts elapsed wall time, stopping at zero.
    pub fn charge(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    /// Restores the full budget.
    pub fn refresh(&mut self) {
        self.remaining = self.budget;
    }

    /// Returns the slot to the free state. Resetting a free slot changes nothing.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn reset(&mut self) {
        if !self.is_free() {
            info!("Game has ended, resetting for a new player");
        } else {
            debug!("Resetting free game");
        }
        self.remaining = self.budget;
        self.peer = None;
        self.turn = None;
        self.board.reset();
    }
}
