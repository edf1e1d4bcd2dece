//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RoomError, TransportError};

/// 参加者接続（名前待ち状態）のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 表示名が既に使われている
    #[error("Display name '{0}' is already taken")]
    NameTaken(String),

    /// 表示名を受信する前に接続が切れた
    #[error("Connection lost before a display name was received: {0}")]
    NameNotReceived(TransportError),
}

/// メッセージ中継ループが終了した理由
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayEnd {
    /// 受信失敗（切断とみなす）
    #[error("Peer disconnected: {0}")]
    Disconnected(TransportError),

    /// ルーム側が利用できなくなった
    #[error("Room unavailable: {0}")]
    Room(RoomError),
}
