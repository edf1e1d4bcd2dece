//! Domain layer error definitions.

use std::{fmt, time::Duration};

use thiserror::Error;

use super::{transport::MessageSink, value_object::DisplayName};

/// Errors related to room configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Queue capacity must be positive
    #[error("Queue capacity must be at least 1")]
    ZeroQueueCapacity,

    /// Broadcast interval out of the accepted range
    #[error("Broadcast interval must be between {min:?} and {max:?} (got {actual:?})")]
    BroadcastIntervalOutOfRange {
        min: Duration,
        max: Duration,
        actual: Duration,
    },

    /// Send timeout out of the accepted range
    #[error("Send timeout must be between {min:?} and {max:?} (got {actual:?})")]
    SendTimeoutOutOfRange {
        min: Duration,
        max: Duration,
        actual: Duration,
    },
}

/// Errors reported by a transport channel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Peer closed the channel (close frame or end of stream)
    #[error("Connection closed by peer")]
    Closed,

    /// Underlying socket failure
    #[error("Transport failure: {0}")]
    Io(String),

    /// Peer is not reading; its outbound backlog is full
    #[error("Outbound backlog is full")]
    Backlogged,

    /// A send did not complete in time
    #[error("Send timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors related to Room domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The message queue no longer accepts fragments
    #[error("Message queue is closed")]
    QueueClosed,

    /// The room a client belongs to has been dropped
    #[error("Chat room is no longer available")]
    RoomGone,
}

/// A join attempt whose display name is already registered.
///
/// Carries the unused sink back so the caller can close the transport.
#[derive(Error)]
#[error("Display name '{name}' is already taken")]
pub struct JoinRejected {
    pub name: DisplayName,
    pub sink: Box<dyn MessageSink>,
}

impl fmt::Debug for JoinRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinRejected")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
