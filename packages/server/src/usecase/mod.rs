//! UseCase 層
//!
//! 接続ごとのライフサイクルを実装するレイヤー。
//! UI 層から呼び出され、Domain 層（ChatRoom）を操作します。

pub mod connect_participant;
pub mod error;
pub mod relay_messages;
pub mod session;

pub use connect_participant::ConnectParticipantUseCase;
pub use error::{ConnectError, RelayEnd};
pub use relay_messages::RelayMessagesUseCase;
pub use session::{ChatSession, SessionOutcome, SessionState};
