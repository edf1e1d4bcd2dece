//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessagesUseCase::execute() メソッド
//! - 受信したメッセージを送信者名付きでルームのキューに積む処理
//!
//! ### なぜこのテストが必要か
//! - 受信順がキューの順序に反映されることを保証
//! - 受信失敗がエラーではなく切断として扱われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メッセージの中継後に切断
//! - エッジケース：ルームが破棄された後の中継

use std::sync::Arc;

use crate::domain::{Client, MessageSource};

use super::error::RelayEnd;

/// メッセージ中継のユースケース
pub struct RelayMessagesUseCase {
    client: Arc<Client>,
}

impl RelayMessagesUseCase {
    /// 新しい RelayMessagesUseCase を作成
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// 受信ループを実行
    ///
    /// 受信に失敗するか、ルームが利用できなくなるまで戻らない。
    /// キューが満杯の間は待たされる（バックプレッシャー）。
    pub async fn execute<S>(&self, source: &mut S) -> RelayEnd
    where
        S: MessageSource + ?Sized,
    {
        loop {
            let text = match source.receive().await {
                Ok(text) => text,
                Err(e) => return RelayEnd::Disconnected(e),
            };
            tracing::debug!(name = %self.client.name(), "Received message");

            if let Err(e) = self.client.new_msg(&text).await {
                return RelayEnd::Room(e);
            }
        }
    }
}
