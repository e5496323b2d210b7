//! The receive/dispatch/expire loop.
//!
//! One datagram is handled to completion, reply included, before the next
//! wait begins. After every handled command all active games are charged the
//! wall time since the wait started, the targeted game is refreshed, and
//! games whose budget reached zero are evicted. A wait that times out while
//! games are active resets the whole roster.

use crate::config::ServerConfig;
use crate::machine::{GameMachine, Transition};
use crate::protocol::{Command, DecodeError, decode};
use crate::roster::Roster;
use crate::session::SessionId;
use crate::transport::{Received, Transport};
use tokio::time::Instant;
use tracing::{error, info, instrument, warn};

/// What one loop iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A valid command was dispatched.
    Handled {
        /// Effect on the targeted game.
        transition: Transition,
        /// Games evicted for running out of time afterwards.
        evicted: Vec<SessionId>,
    },
    /// The datagram failed validation and was dropped.
    Discarded(DecodeError),
    /// The wait timed out with no game in play.
    Idle,
    /// The wait timed out with games in play; these were reset.
    IdleReset(Vec<SessionId>),
    /// The transport reported an error.
    ReceiveFailed,
}

/// Tic-tac-toe server playing first in every game.
#[derive(Debug)]
pub struct GameServer<T> {
    transport: T,
    config: ServerConfig,
    roster: Roster,
    announce_wait: bool,
}

impl<T: Transport> GameServer<T> {
    /// Creates a server with a free roster sized by `config`.
    #[instrument(skip(transport))]
    pub fn new(transport: T, config: ServerConfig) -> Self {
        let roster = Roster::new(*config.max_games(), config.timeout());
        Self {
            transport,
            config,
            roster,
            announce_wait: true,
        }
    }

    /// The game roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serves forever.
    pub async fn run(&mut self) {
        loop {
            self.step().await;
        }
    }

    /// Waits for one datagram (or the timeout) and processes it.
    #[instrument(skip(self))]
    pub async fn step(&mut self) -> Step {
        if self.announce_wait {
            info!("Waiting for a player to issue a command");
        }

        let start = Instant::now();
        let (bytes, from) = match self.transport.receive(self.config.timeout()).await {
            Ok(Received::Datagram { bytes, from }) => (bytes, from),
            Ok(Received::TimedOut) => return self.on_idle(),
            Err(e) => {
                error!(error = %e, "Failed to receive command");
                return Step::ReceiveFailed;
            }
        };

        let datagram = match decode(&bytes, self.config.limits()) {
            Ok(datagram) => datagram,
            Err(e) => {
                warn!(%from, error = %e, "Datagram discarded");
                return Step::Discarded(e);
            }
        };

        let machine = GameMachine::new(&self.transport, *self.config.protocol_version());
        let (touched, transition) = match datagram.command {
            Command::NewGame => {
                let slot = self.roster.find_free_slot();
                let touched = slot.as_ref().map(|session| *session.id());
                (touched, machine.new_game(slot, from).await)
            }
            Command::Move => {
                let slot = SessionId::new(datagram.session).and_then(|id| self.roster.get_mut(id));
                let Some(session) = slot else {
                    let e = DecodeError::InvalidSessionId {
                        found: datagram.session,
                        max: *self.config.max_games(),
                    };
                    warn!(%from, error = %e, "Datagram discarded");
                    return Step::Discarded(e);
                };
                let touched = Some(*session.id());
                (touched, machine.play_move(session, from, datagram.data).await)
            }
        };

        self.roster.charge_elapsed(start.elapsed(), touched);
        let evicted = self.roster.sweep_expired();
        self.announce_wait = true;

        Step::Handled {
            transition,
            evicted,
        }
    }

    fn on_idle(&mut self) -> Step {
        if self.roster.active_count() == 0 {
            self.announce_wait = false;
            return Step::Idle;
        }

        warn!("Nobody has responded in a while, resetting game states");
        let reset = self.roster.reset_all();
        self.announce_wait = true;
        Step::IdleReset(reset)
    }
}
