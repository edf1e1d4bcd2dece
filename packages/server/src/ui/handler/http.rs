//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RoomStateDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint exposing the current room state
pub async fn get_room_state(State(state): State<Arc<AppState>>) -> Json<RoomStateDto> {
    let room = &state.room;
    let config = room.config();

    Json(RoomStateDto {
        participants: room.participant_names().await,
        pending_fragments: room.pending_fragments(),
        queue_capacity: config.queue_capacity(),
        broadcast_interval_ms: u64::try_from(config.broadcast_interval().as_millis())
            .unwrap_or(u64::MAX),
        created_at: room.created_at().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChatRoom, DisplayName, RoomConfig, transport::testing::RecordingSink,
    };

    #[tokio::test]
    async fn test_health_check() {
        // テスト項目: ヘルスチェックは status: ok を返す
        let Json(body) = health_check().await;

        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_room_state() {
        // テスト項目: ルームの状態（参加者・保留中の断片・設定）を返す
        // given (前提条件):
        let room = ChatRoom::new(RoomConfig::default());
        room.join(DisplayName::from("bob"), RecordingSink::new().boxed())
            .await
            .unwrap();
        room.join(DisplayName::from("alice"), RecordingSink::new().boxed())
            .await
            .unwrap();
        let state = Arc::new(AppState::new(room));

        // when (操作):
        let Json(dto) = get_room_state(State(state)).await;

        // then (期待する結果):
        assert_eq!(dto.participants, vec!["alice", "bob"]);
        assert_eq!(dto.pending_fragments, 2);
        assert_eq!(dto.queue_capacity, 5);
        assert_eq!(dto.broadcast_interval_ms, 100);
        assert!(dto.created_at.ends_with('Z'));
    }
}
