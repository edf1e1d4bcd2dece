//! Transport seam.
//!
//! The chat room never touches sockets directly. A connection is split into
//! a [`MessageSink`] owned by the registered client and a [`MessageSource`]
//! read by the connection's own task.

use async_trait::async_trait;

use super::error::TransportError;

/// Outbound half of a client connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Write one block verbatim to the peer.
    async fn send(&self, block: &str) -> Result<(), TransportError>;

    /// Close the channel. Errors are not reported.
    async fn close(&self);
}

/// Inbound half of a client connection.
#[async_trait]
pub trait MessageSource: Send {
    /// Wait for the next text message from the peer.
    ///
    /// Any error means the peer is gone.
    async fn receive(&mut self) -> Result<String, TransportError>;
}
