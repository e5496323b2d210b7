//! Datagram transport used by the server loop.

use async_trait::async_trait;
use derive_more::{Display, Error};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{instrument, trace};

/// Receive buffer size; anything past the fixed layout is dropped by decoding.
const RECV_BUFFER: usize = 100;

/// Result of waiting for the next datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A datagram arrived.
    Datagram {
        /// Raw bytes as received.
        bytes: Vec<u8>,
        /// Sender address.
        from: SocketAddr,
    },
    /// Nothing arrived within the wait.
    TimedOut,
}

/// Send/receive of whole datagrams.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Waits up to `wait` for one datagram.
    async fn receive(&self, wait: Duration) -> Result<Received, TransportError>;

    /// Sends one datagram to `to`.
    async fn send(&self, bytes: &[u8], to: SocketAddr) -> Result<(), TransportError>;
}

#[async_trait]
impl Transport for UdpSocket {
    #[instrument(level = "trace", skip(self))]
    async fn receive(&self, wait: Duration) -> Result<Received, TransportError> {
        let mut buf = [0u8; RECV_BUFFER];
        match tokio::time::timeout(wait, self.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                trace!(len, %from, "Datagram received");
                Ok(Received::Datagram {
                    bytes: buf[..len].to_vec(),
                    from,
                })
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Ok(Received::TimedOut),
        }
    }

    #[instrument(level = "trace", skip(self, bytes))]
    async fn send(&self, bytes: &[u8], to: SocketAddr) -> Result<(), TransportError> {
        let sent = self.send_to(bytes, to).await?;
        if sent != bytes.len() {
            return Err(TransportError::new(format!(
                "Short send: {} of {} bytes",
                sent,
                bytes.len()
            )));
        }
        Ok(())
    }
}

/// Transport error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for TransportError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Socket error: {}", err))
    }
}
