//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 最初の受信メッセージを表示名として入室する処理
//!
//! ### なぜこのテストが必要か
//! - 表示名の重複を防ぐ
//! - 入室に失敗した接続が確実に閉じられることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の入室
//! - 異常系：重複した表示名での入室試行
//! - 異常系：表示名を送る前の切断

use std::sync::Arc;

use crate::domain::{ChatRoom, Client, DisplayName, MessageSink, MessageSource};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    room: Arc<ChatRoom>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(room: Arc<ChatRoom>) -> Self {
        Self { room }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `source` - 受信側。最初のメッセージを表示名として扱う
    /// * `sink` - 送信側。入室に成功すると Client が所有する
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Client>)` - 入室成功
    /// * `Err(ConnectError)` - 入室失敗（sink は閉じられている）
    pub async fn execute<S>(
        &self,
        source: &mut S,
        sink: Box<dyn MessageSink>,
    ) -> Result<Arc<Client>, ConnectError>
    where
        S: MessageSource + ?Sized,
    {
        // 1. 最初のメッセージを表示名として受信（検証・トリムはしない）
        let name = match source.receive().await {
            Ok(raw) => DisplayName::from(raw),
            Err(e) => {
                sink.close().await;
                return Err(ConnectError::NameNotReceived(e));
            }
        };

        // 2. 入室（重複時は sink が返されるので閉じる）
        match self.room.join(name, sink).await {
            Ok(client) => Ok(client),
            Err(rejected) => {
                rejected.sink.close().await;
                Err(ConnectError::NameTaken(rejected.name.into_string()))
            }
        }
    }
}
