//! Batched-broadcast WebSocket chat room.
//!
//! Participants connect over a WebSocket, send their display name as the
//! first message and then chat. Every message is queued in a bounded FIFO;
//! a periodic broadcast loop drains the queue and sends the merged block to
//! every participant.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{Args, ServerConfig};
pub use error::ServerError;
pub use ui::{run, run_with_addr};
