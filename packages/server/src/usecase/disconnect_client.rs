//! UseCase: クライアント切断処理
//!
//! 接続を ConnectionSet から取り除くだけで、他のクライアントへの通知（退出イベント）は行わない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

use super::sequencer::RelaySequencer;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RelaySequencer>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, sequencer: Arc<RelaySequencer>) -> Self {
        Self {
            message_pusher,
            sequencer,
        }
    }

    /// クライアント切断を実行（未登録の接続に対しても冪等）
    pub async fn execute(&self, connection_id: &ConnectionId) {
        let _gate = self.sequencer.enter().await;
        self.message_pusher.unregister_client(connection_id).await;
    }
}
