//! Test fixtures shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use futures_util::{SinkExt, StreamExt};
use murmur_server::{ServerConfig, domain::RoomConfig, run_with_addr};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const INDEX_HTML: &str = "<html><body>murmur</body></html>";

/// A server running in the background on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    static_dir: PathBuf,
}

impl TestServer {
    /// Start a server with a short broadcast interval and a static
    /// directory containing `index.html`.
    pub async fn start() -> Self {
        Self::start_with(RoomConfig::new(5, Duration::from_millis(20)).unwrap()).await
    }

    pub async fn start_with(room: RoomConfig) -> Self {
        let static_dir =
            std::env::temp_dir().join(format!("murmur-static-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");
        std::fs::write(static_dir.join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");

        let config = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            room,
            static_dir: static_dir.clone(),
        };
        let addr = run_with_addr(config)
            .await
            .expect("Failed to start server");

        Self { addr, static_dir }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Connect and send `name` as the first message.
    pub async fn join(&self, name: &str) -> WsClient {
        let (mut ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws.send(Message::Text(name.into()))
            .await
            .expect("Failed to send name");
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.static_dir);
    }
}

/// Next text block, skipping control frames. `None` once the server closes.
pub async fn next_block(ws: &mut WsClient) -> Option<String> {
    loop {
        let frame = timeout(Duration::from_secs(3), ws.next())
            .await
            .expect("Timed out waiting for a frame");
        match frame {
            Some(Ok(Message::Text(text))) => return Some(text.as_str().to_string()),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
            Some(Ok(_)) => continue,
        }
    }
}

/// Read blocks until one of their lines equals `expected`.
///
/// Blocks may merge several lines when events fall into the same
/// broadcast cycle, so lines are compared one by one.
pub async fn expect_line(ws: &mut WsClient, expected: &str) {
    loop {
        let block = next_block(ws)
            .await
            .unwrap_or_else(|| panic!("Connection closed while waiting for '{expected}'"));
        if block.split("<BR>").any(|line| line == expected) {
            return;
        }
    }
}
