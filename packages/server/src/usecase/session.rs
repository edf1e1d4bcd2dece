//! UseCase: 接続ライフサイクル
//!
//! 1 接続につき 1 つの ChatSession が
//! `Connecting → AwaitingName → Active → Closed` の順に状態を進める。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChatSession::run() メソッド
//! - 入室・中継・退室の一連の流れと状態遷移
//!
//! ### なぜこのテストが必要か
//! - 受信失敗が必ず退室（Leave）につながることを保証
//! - 入室に失敗した接続では退室通知が出ないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室 → 発言 → 切断
//! - 異常系：表示名の重複

use std::sync::Arc;

use crate::domain::{ChatRoom, DisplayName, MessageSink, MessageSource};

use super::{
    connect_participant::ConnectParticipantUseCase,
    error::{ConnectError, RelayEnd},
    relay_messages::RelayMessagesUseCase,
};

/// 接続の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// トランスポートのアップグレード中
    Connecting,
    /// 最初のメッセージ（表示名）待ち
    AwaitingName,
    /// 入室済み。メッセージを中継中
    Active,
    /// 終了（以降の操作はない）
    Closed,
}

/// セッションの終了結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 入室できなかった
    Rejected(ConnectError),
    /// 入室後に終了した
    Finished { name: DisplayName, end: RelayEnd },
}

/// 1 接続分のライフサイクルを駆動する
pub struct ChatSession {
    room: Arc<ChatRoom>,
    state: SessionState,
}

impl ChatSession {
    /// 新しい ChatSession を作成（Connecting 状態）
    pub fn new(room: Arc<ChatRoom>) -> Self {
        Self {
            room,
            state: SessionState::Connecting,
        }
    }

    /// 現在の状態
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = ?self.state, to = ?next, "Session state changed");
        self.state = next;
    }

    /// トランスポートのアップグレード完了後に呼び出し、接続が終わるまで実行する
    pub async fn run<S>(&mut self, mut source: S, sink: Box<dyn MessageSink>) -> SessionOutcome
    where
        S: MessageSource,
    {
        self.transition(SessionState::AwaitingName);
        let connect_usecase = ConnectParticipantUseCase::new(self.room.clone());
        let client = match connect_usecase.execute(&mut source, sink).await {
            Ok(client) => client,
            Err(e) => {
                tracing::info!("Join failed: {}", e);
                self.transition(SessionState::Closed);
                return SessionOutcome::Rejected(e);
            }
        };

        self.transition(SessionState::Active);
        let end = RelayMessagesUseCase::new(client.clone())
            .execute(&mut source)
            .await;
        tracing::info!(name = %client.name(), "Relay stopped: {}", end);

        // 受信失敗は切断とみなし、退室してから接続を閉じる
        client.exit().await;
        client.close().await;
        self.transition(SessionState::Closed);

        SessionOutcome::Finished {
            name: client.name().clone(),
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;
    use crate::domain::{
        RoomConfig, TransportError,
        transport::testing::{ChannelSource, RecordingSink, ScriptedSource},
    };

    #[tokio::test]
    async fn test_session_join_chat_and_leave() {
        // テスト項目: 入室 → 発言 → 切断 で入室通知・発言・退室通知が順に積まれる
        // given (前提条件):
        let room = ChatRoom::new(RoomConfig::default());
        let mut session = ChatSession::new(room.clone());
        assert_eq!(session.state(), SessionState::Connecting);
        let sink = RecordingSink::new();

        // when (操作):
        let outcome = session
            .run(ScriptedSource::new(["alice", "hi"]), sink.boxed())
            .await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            SessionOutcome::Finished {
                name: DisplayName::from("alice"),
                end: RelayEnd::Disconnected(TransportError::Closed),
            }
        );
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(
            room.queue().drain().await,
            vec![
                "<B>alice</B> has joined the chat.",
                "<B>alice:</B> hi",
                "<B>alice</B> has left the chat.",
            ]
        );
        assert_eq!(room.participant_count().await, 0);
        assert!(sink.is_closed());
    }

    #[tokio::test]
    async fn test_session_rejected_on_duplicate_name() {
        // テスト項目: 表示名が重複すると Closed になり、退室通知は出ない
        // given (前提条件):
        let room = ChatRoom::new(RoomConfig::default());
        room.join(DisplayName::from("alice"), RecordingSink::new().boxed())
            .await
            .unwrap();
        room.queue().drain().await;
        let mut session = ChatSession::new(room.clone());
        let sink = RecordingSink::new();

        // when (操作):
        let outcome = session
            .run(ScriptedSource::new(["alice", "hi"]), sink.boxed())
            .await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            SessionOutcome::Rejected(ConnectError::NameTaken("alice".to_string()))
        );
        assert_eq!(session.state(), SessionState::Closed);
        assert!(sink.is_closed());
        assert_eq!(room.pending_fragments(), 0);
        assert_eq!(room.participant_names().await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_session_stays_active_until_source_fails() {
        // テスト項目: 受信が続く限り入室状態のまま、切断で退室する
        // given (前提条件):
        let room = ChatRoom::new(RoomConfig::default());
        let (tx, source) = ChannelSource::new();
        let task = {
            let room = room.clone();
            tokio::spawn(async move {
                let mut session = ChatSession::new(room);
                session.run(source, RecordingSink::new().boxed()).await
            })
        };

        // when (操作):
        tx.send("bob".to_string()).unwrap();
        timeout(Duration::from_secs(1), async {
            while room.participant_count().await == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("bob must join");
        assert!(!task.is_finished());
        drop(tx);

        // then (期待する結果):
        let outcome = timeout(Duration::from_secs(1), task)
            .await
            .expect("session must end")
            .unwrap();
        assert!(matches!(outcome, SessionOutcome::Finished { .. }));
        assert_eq!(room.participant_count().await, 0);
    }
}
