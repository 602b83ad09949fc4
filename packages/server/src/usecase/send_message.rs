//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加（容量超過時は最も古いものを捨てる）と、送信者を含む全員への配信
//!
//! ### なぜこのテストが必要か
//! - message は送信者自身にもエコーされる必要がある
//! - 履歴の上限が守られることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数クライアントへの配信
//! - エッジケース：送信者のみが接続している場合、容量超過
//! - 異常系：配信層のエラー

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, HistoryRepository, MessagePusher, RelayEvent};

use super::{error::SendMessageError, sequencer::RelaySequencer};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（履歴ストアの抽象化）
    repository: Arc<dyn HistoryRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RelaySequencer>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<RelaySequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続 ID（ログ用。配信対象からは除外しない）
    /// * `message` - 送信されたメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 実際に配信できた接続数
    /// * `Err(SendMessageError)` - 配信失敗
    pub async fn execute(
        &self,
        from: &ConnectionId,
        message: ChatMessage,
    ) -> Result<usize, SendMessageError> {
        let _gate = self.sequencer.enter().await;

        // 1. 履歴に追加（容量超過時は最も古いものを捨てる）
        if let Some(evicted) = self.repository.append(message.clone()).await {
            tracing::debug!(
                "History full, evicted message from '{}' at {}",
                evicted.user,
                evicted.timestamp.as_str()
            );
        }

        // 2. 送信者を含む全員に配信
        let delivered = self
            .message_pusher
            .broadcast(&RelayEvent::Message(message), None)
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))?;

        tracing::debug!(
            "Message from connection '{}' delivered to {} connection(s)",
            from,
            delivered
        );

        Ok(delivered)
    }
}
