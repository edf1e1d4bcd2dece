//! HTTP API response DTOs for the chat room.

use serde::{Deserialize, Serialize};

/// Snapshot of the chat room for the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStateDto {
    /// Registered display names, sorted
    pub participants: Vec<String>,
    /// Fragments waiting for the next broadcast
    pub pending_fragments: usize,
    pub queue_capacity: usize,
    pub broadcast_interval_ms: u64,
    pub created_at: String, // RFC 3339
}
