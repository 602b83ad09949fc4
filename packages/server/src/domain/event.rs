//! リレーからクライアントへ配信するイベント

use super::entity::ChatMessage;

/// 配信イベント（ワイヤ形式への変換は Infrastructure 層が担当）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// 接続直後に送る履歴（古い順）
    History(Vec<ChatMessage>),
    /// 新しいチャットメッセージ
    Message(ChatMessage),
    /// 入力中通知
    Typing { user: String },
}

impl RelayEvent {
    /// ログ出力用のイベント名
    pub fn kind(&self) -> &'static str {
        match self {
            RelayEvent::History(_) => "history",
            RelayEvent::Message(_) => "message",
            RelayEvent::Typing { .. } => "typing",
        }
    }
}
