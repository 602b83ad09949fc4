//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、その接続だけへの履歴送信
//!
//! ### なぜこのテストが必要か
//! - 新規接続は現在の履歴を古い順に、自分だけが受け取る必要がある
//! - 登録後は以降のブロードキャストを受け取れることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の履歴 / 既存の履歴がある状態での接続
//! - 異常系：履歴送信前に接続が閉じた場合

use std::sync::Arc;

use crate::domain::{ConnectionId, HistoryRepository, MessagePusher, PusherChannel, RelayEvent};

use super::{error::ConnectError, sequencer::RelaySequencer};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（履歴ストアの抽象化）
    repository: Arc<dyn HistoryRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<RelaySequencer>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
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

    /// クライアント接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続の ID
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信した履歴の件数
    /// * `Err(ConnectError)` - 履歴送信失敗（接続は登録解除される）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, ConnectError> {
        let _gate = self.sequencer.enter().await;

        // 1. MessagePusher にクライアントを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        // 2. 現在の履歴をこの接続だけに送信
        let history = self.repository.snapshot().await;
        let count = history.len();
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, &RelayEvent::History(history))
            .await
        {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(ConnectError::HistoryDeliveryFailed(e.to_string()));
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryHistoryRepository,
        },
    };
    use tokio::sync::mpsc;

    fn create_usecase() -> (
        ConnectClientUseCase,
        Arc<InMemoryHistoryRepository>,
        Arc<WebSocketMessagePusher>,
    ) {
        let repository = Arc::new(InMemoryHistoryRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectClientUseCase::new(
            repository.clone(),
            pusher.clone(),
            Arc::new(RelaySequencer::new()),
        );
        (usecase, repository, pusher)
    }

    #[tokio::test]
    async fn test_connect_with_empty_history() {
        // テスト項目: 履歴が空のとき、空の history イベントが届き接続が登録される
        // given (前提条件):
        let (usecase, _repository, pusher) = create_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"history","data":[]}"#.to_string())
        );
        assert_eq!(pusher.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_connect_receives_existing_history_in_order() {
        // テスト項目: 既存の履歴が古い順に、新規接続だけに送られる
        // given (前提条件):
        let (usecase, repository, _pusher) = create_usecase();
        for text in ["first", "second"] {
            repository
                .append(ChatMessage::new(
                    "alice",
                    "🐱",
                    text,
                    Timestamp::new("2024-01-01T00:00:00.000Z"),
                ))
                .await;
        }
        let (tx_old, mut rx_old) = mpsc::unbounded_channel();
        usecase.execute(ConnectionId::generate(), tx_old).await.unwrap();
        let _ = rx_old.recv().await;
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx_new).await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        let frame = rx_new.recv().await.unwrap();
        let first = frame.find("first").unwrap();
        let second = frame.find("second").unwrap();
        assert!(first < second);
        assert!(rx_old.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_connect_closed_before_history() {
        // テスト項目: 履歴送信前に接続が閉じていればエラーになり、登録は取り消される
        // given (前提条件):
        let (usecase, _repository, pusher) = create_usecase();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectError::HistoryDeliveryFailed(_))));
        assert_eq!(pusher.connection_count().await, 0);
    }
}
