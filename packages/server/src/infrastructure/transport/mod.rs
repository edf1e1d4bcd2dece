//! Transport adapters implementing the domain's sink/source traits.

pub mod websocket;

pub use websocket::{WebSocketSink, WebSocketSource, split_socket};
