//! UseCase: 入力中通知
//!
//! 送信者以外の全員に typing イベントを配信する。履歴には記録しない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RelayEvent};

use super::{error::NotifyTypingError, sequencer::RelaySequencer};

/// 入力中通知のユースケース
pub struct NotifyTypingUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RelaySequencer>,
}

impl NotifyTypingUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, sequencer: Arc<RelaySequencer>) -> Self {
        Self {
            message_pusher,
            sequencer,
        }
    }

    /// 入力中通知を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 実際に配信できた接続数（送信者は含まない）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        user: String,
    ) -> Result<usize, NotifyTypingError> {
        let _gate = self.sequencer.enter().await;

        self.message_pusher
            .broadcast(&RelayEvent::Typing { user }, Some(from))
            .await
            .map_err(|e| NotifyTypingError::BroadcastFailed(e.to_string()))
    }
}
