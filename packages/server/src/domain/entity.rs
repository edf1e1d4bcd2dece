//! Client entity.

use std::{
    fmt,
    sync::{
        Weak,
        atomic::{AtomicBool, Ordering},
    },
};

use super::{
    error::{RoomError, TransportError},
    message,
    room::ChatRoom,
    transport::MessageSink,
    value_object::{DisplayName, Timestamp},
};

/// A connected, successfully joined participant.
///
/// Owns the outbound half of its connection and keeps only a weak link to
/// its room: the room owns the client, never the other way round.
pub struct Client {
    name: DisplayName,
    sink: Box<dyn MessageSink>,
    room: Weak<ChatRoom>,
    joined_at: Timestamp,
    exited: AtomicBool,
}

impl Client {
    /// Create a new client bound to `room`.
    pub fn new(name: DisplayName, sink: Box<dyn MessageSink>, room: Weak<ChatRoom>) -> Self {
        Self {
            name,
            sink,
            room,
            joined_at: Timestamp::now(),
            exited: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn joined_at(&self) -> Timestamp {
        self.joined_at
    }

    /// Give back the parts of a client that never made it into a room.
    pub(crate) fn into_parts(self) -> (DisplayName, Box<dyn MessageSink>) {
        (self.name, self.sink)
    }

    /// Post `text` to the room as a line attributed to this client.
    ///
    /// Waits while the room's queue is full.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::RoomGone` if the room has been dropped.
    pub async fn new_msg(&self, text: &str) -> Result<(), RoomError> {
        let room = self.room.upgrade().ok_or(RoomError::RoomGone)?;
        room.post(message::chat_line(&self.name, text)).await
    }

    /// Leave the room. Only the first call has an effect.
    pub async fn exit(&self) {
        if self.exited.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(room) = self.room.upgrade() {
            room.leave(self.name.as_str()).await;
        }
    }

    /// Write `block` verbatim to this client's transport.
    pub async fn send(&self, block: &str) -> Result<(), TransportError> {
        self.sink.send(block).await
    }

    /// Close this client's transport.
    pub async fn close(&self) {
        self.sink.close().await;
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("name", &self.name)
            .field("joined_at", &self.joined_at)
            .field("exited", &self.exited.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
