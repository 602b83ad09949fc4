//! エンティティ

use super::value_object::Timestamp;

/// チャットメッセージ
///
/// 作成後は変更されない。順序は履歴への追加順で決まる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// 送信者の表示名
    pub user: String,
    /// 送信者のアバター（絵文字など短いグリフ）
    pub avatar: String,
    /// 本文
    pub text: String,
    /// クライアントが付与した送信時刻
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        user: impl Into<String>,
        avatar: impl Into<String>,
        text: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            user: user.into(),
            avatar: avatar.into(),
            text: text.into(),
            timestamp,
        }
    }
}
