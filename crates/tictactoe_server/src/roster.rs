//! Fixed-capacity collection of game slots.

use crate::session::{Session, SessionId};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Every game slot the server can run, allocated once at startup.
///
/// Slots are never created or destroyed after construction; only their
/// content is reset.
#[derive(Debug, Clone)]
pub struct Roster {
    sessions: Vec<Session>,
}

impl Roster {
    /// Creates `capacity` free slots numbered `1..=capacity`.
    #[instrument]
    pub fn new(capacity: u8, budget: Duration) -> Self {
        info!("Initializing game roster");
        let sessions = (1..=capacity)
            .filter_map(SessionId::new)
            .map(|id| Session::new(id, budget))
            .collect();
        Self { sessions }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.sessions.len()
    }

    /// Slot for a game number, if it exists.
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(id.index())
    }

    /// Mutable slot for a game number, if it exists.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id.index())
    }

    /// First free slot in game-number order.
    pub fn find_free_slot(&mut self) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|session| session.is_free())
    }

    /// Number of slots with a game in play.
    pub fn active_count(&self) -> usize {
        self.sessions.iter().filter(|s| !s.is_free()).count()
    }

    /// All slots in game-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    /// Charges `elapsed` to every active game, then refreshes `touched`.
    #[instrument(skip(self))]
    pub fn charge_elapsed(&mut self, elapsed: Duration, touched: Option<SessionId>) {
        for session in self.sessions.iter_mut().filter(|s| !s.is_free()) {
            session.charge(elapsed);
        }
        if let Some(session) = touched.and_then(|id| self.get_mut(id)) {
            session.refresh();
        }
    }

    /// Resets every slot whose budget ran out and returns their numbers.
    #[instrument(skip(self))]
    pub fn sweep_expired(&mut self) -> Vec<SessionId> {
        let mut evicted = Vec::new();
        for session in self.sessions.iter_mut().filter(|s| s.is_expired()) {
            match session.peer() {
                Some(peer) => warn!(
                    session = %session.id(),
                    %peer,
                    "Game has timed out, player ran out of time to respond"
                ),
                None => warn!(session = %session.id(), "Game has timed out"),
            }
            evicted.push(*session.id());
            session.reset();
        }
        evicted
    }

    /// Resets every slot regardless of budget and returns the active ones.
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) -> Vec<SessionId> {
        let active: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|s| !s.is_free())
            .map(|s| *s.id())
            .collect();
        for session in &mut self.sessions {
            session.reset();
        }
        active
    }
}
