//! UseCase 層のエラー型

use thiserror::Error;

/// 接続処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// 新規接続への履歴送信に失敗した
    #[error("Failed to deliver history: {0}")]
    HistoryDeliveryFailed(String),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Failed to broadcast message: {0}")]
    BroadcastFailed(String),
}

/// 入力中通知のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyTypingError {
    #[error("Failed to broadcast typing: {0}")]
    BroadcastFailed(String),
}
