//! Shared helpers for server tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tictactoe_server::{Received, Transport, TransportError};

/// Protocol version used throughout the tests.
pub const VERSION: u8 = 3;

/// Loopback peer on the given port.
pub fn peer(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// NEW_GAME datagram.
pub fn new_game() -> Vec<u8> {
    vec![VERSION, 0, 0, 0]
}

/// MOVE datagram for a 1-based game number and board number.
pub fn move_to(session: u8, square: u8) -> Vec<u8> {
    vec![VERSION, 1, b'0' + square, session]
}

/// In-memory transport replaying a script of incoming datagrams.
///
/// Each scripted datagram arrives after its delay; once the script runs dry
/// every receive waits out the full timeout. Run under a paused tokio clock
/// so delays cost no real time.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    inbox: Mutex<VecDeque<(Duration, Vec<u8>, SocketAddr)>>,
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    fail_sends: AtomicBool,
}

impl ScriptedTransport {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a datagram that arrives `delay` after the receive starts.
    pub fn push(&self, delay: Duration, bytes: Vec<u8>, from: SocketAddr) {
        self.inbox.lock().unwrap().push_back((delay, bytes, from));
    }

    /// Makes every following send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Everything sent so far.
    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent datagram sent.
    pub fn last_sent(&self) -> Option<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn receive(&self, wait: Duration) -> Result<Received, TransportError> {
        let next = self.inbox.lock().unwrap().pop_front();
        match next {
            Some((delay, bytes, from)) if delay < wait => {
                tokio::time::sleep(delay).await;
                Ok(Received::Datagram { bytes, from })
            }
            Some(entry) => {
                // Arrives too late for this wait; keep it for the next one.
                self.inbox.lock().unwrap().push_front((entry.0 - wait, entry.1, entry.2));
                tokio::time::sleep(wait).await;
                Ok(Received::TimedOut)
            }
            None => {
                tokio::time::sleep(wait).await;
                Ok(Received::TimedOut)
            }
        }
    }

    async fn send(&self, bytes: &[u8], to: SocketAddr) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::new("Simulated send failure"));
        }
        self.sent.lock().unwrap().push((bytes.to_vec(), to));
        Ok(())
    }
}
