//! ドメイン層のエラー型

use thiserror::Error;

/// MessagePusher の送信エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 送信先のクライアントが登録されていない
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// 送信先の接続が既に閉じている
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// イベントのエンコードに失敗した
    #[error("Failed to encode event: {0}")]
    Encode(String),
}
