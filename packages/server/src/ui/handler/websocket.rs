//! WebSocket connection handler.

use std::sync::Arc;

use axum::{
    extract::{State, ws::WebSocket, ws::WebSocketUpgrade},
    response::IntoResponse,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    infrastructure::transport::split_socket,
    ui::state::AppState,
    usecase::{ChatSession, SessionOutcome},
};

/// Upgrade the request and run the chat session on the resulting socket.
///
/// GET /ws
///
/// The first text message on the socket is the requested display name.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = Uuid::new_v4();
    tracing::debug!(%connection_id, "WebSocket upgrade requested");

    ws.on_failed_upgrade(move |e: axum::Error| {
        tracing::warn!(%connection_id, "WebSocket upgrade failed: {}", e);
    })
    .on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: Uuid) {
    let span = tracing::info_span!("connection", id = %connection_id);

    async move {
        let (sink, source) = split_socket(socket);
        let mut session = ChatSession::new(state.room.clone());

        match session.run(source, Box::new(sink)).await {
            SessionOutcome::Rejected(e) => {
                tracing::info!("Connection closed without joining: {}", e);
            }
            SessionOutcome::Finished { name, end } => {
                tracing::info!(%name, "Connection closed: {}", end);
            }
        }
    }
    .instrument(span)
    .await
}
