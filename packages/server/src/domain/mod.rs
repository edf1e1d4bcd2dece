//! Domain layer for the chat room.
//!
//! This module contains the chat room core (registry, queue, broadcast)
//! and is independent of the WebSocket and HTTP concerns.

pub mod config;
pub mod entity;
pub mod error;
pub mod message;
pub mod queue;
pub mod registry;
pub mod room;
pub mod transport;
pub mod value_object;

pub use config::RoomConfig;
pub use entity::Client;
pub use error::{ConfigError, JoinRejected, RoomError, TransportError};
pub use queue::MessageQueue;
pub use registry::ClientRegistry;
pub use room::{BroadcastReport, ChatRoom};
pub use transport::{MessageSink, MessageSource};
pub use value_object::{DisplayName, Timestamp};
