//! Server state shared by every handler.

use std::sync::Arc;

use crate::domain::ChatRoom;

/// Shared application state
///
/// Constructed once at startup and injected into the router, so every
/// handler reaches the same chat room without a global.
pub struct AppState {
    /// The chat room (registry, queue and broadcast loop)
    pub room: Arc<ChatRoom>,
}

impl AppState {
    pub fn new(room: Arc<ChatRoom>) -> Self {
        Self { room }
    }
}
