//! WebSocket transport adapter.
//!
//! Splits an upgraded axum `WebSocket` into the two halves the chat room
//! works with. Outbound blocks go through a per-connection channel drained by
//! a dedicated writer task, so the broadcast fan-out never waits on a socket.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::domain::{MessageSink, MessageSource, TransportError};

/// Blocks buffered for a peer that is slow to read
pub const OUTBOX_CAPACITY: usize = 64;

/// Split an upgraded socket into a sink and a source.
///
/// Must be called from within a tokio runtime.
pub fn split_socket(socket: WebSocket) -> (WebSocketSink, WebSocketSource) {
    let (sender, receiver) = socket.split();
    let (outbox, rx) = mpsc::channel(OUTBOX_CAPACITY);
    let writer = tokio::spawn(write_loop(sender, rx));
    (
        WebSocketSink { outbox, writer },
        WebSocketSource { receiver },
    )
}

/// Forward queued frames to the socket until the channel closes, a close
/// frame has been written, or the peer goes away.
async fn write_loop(mut sender: SplitSink<WebSocket, Message>, mut rx: mpsc::Receiver<Message>) {
    while let Some(frame) = rx.recv().await {
        let closing = matches!(frame, Message::Close(_));
        if let Err(e) = sender.send(frame).await {
            tracing::debug!("WebSocket write failed: {}", e);
            return;
        }
        if closing {
            break;
        }
    }
    if let Err(e) = sender.close().await {
        tracing::debug!("WebSocket close failed: {}", e);
    }
}

/// Outbound half
pub struct WebSocketSink {
    outbox: mpsc::Sender<Message>,
    writer: JoinHandle<()>,
}

#[async_trait]
impl MessageSink for WebSocketSink {
    /// Queue `block` for the writer task without waiting on the socket.
    async fn send(&self, block: &str) -> Result<(), TransportError> {
        self.outbox
            .try_send(Message::Text(block.to_owned().into()))
            .map_err(|e| match e {
                TrySendError::Full(_) => TransportError::Backlogged,
                TrySendError::Closed(_) => TransportError::Closed,
            })
    }

    async fn close(&self) {
        if self.outbox.try_send(Message::Close(None)).is_err() {
            // Writer is stuck or already gone
            self.writer.abort();
        }
    }
}

/// Inbound half
pub struct WebSocketSource {
    receiver: SplitStream<WebSocket>,
}

#[async_trait]
impl MessageSource for WebSocketSource {
    async fn receive(&mut self) -> Result<String, TransportError> {
        while let Some(frame) = self.receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => return Ok(text.as_str().to_owned()),
                Ok(Message::Binary(bytes)) => {
                    return Ok(String::from_utf8_lossy(&bytes).into_owned());
                }
                Ok(Message::Close(_)) => return Err(TransportError::Closed),
                // Pong replies are sent by axum itself
                Ok(Message::Ping(_) | Message::Pong(_)) => continue,
                Err(e) => return Err(TransportError::Io(e.to_string())),
            }
        }
        Err(TransportError::Closed)
    }
}
