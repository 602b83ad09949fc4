//! UseCase 層
//!
//! リレーの各操作（接続、切断、メッセージ送信、入力中通知、参照系）を
//! Repository / MessagePusher の trait 越しに実行します。

mod connect_client;
mod disconnect_client;
mod error;
mod get_history;
mod get_relay_stats;
mod notify_typing;
mod send_message;
mod sequencer;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, NotifyTypingError, SendMessageError};
pub use get_history::GetHistoryUseCase;
pub use get_relay_stats::{GetRelayStatsUseCase, RelayStats};
pub use notify_typing::NotifyTypingUseCase;
pub use send_message::SendMessageUseCase;
pub use sequencer::RelaySequencer;
