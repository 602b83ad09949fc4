//! UseCase: リレーの状態の参照

use std::sync::Arc;

use crate::domain::{HistoryRepository, MessagePusher};

/// リレーの実行時統計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    pub connections: usize,
    pub history_len: usize,
    pub history_capacity: usize,
}

/// リレーの状態を取得するユースケース
pub struct GetRelayStatsUseCase {
    repository: Arc<dyn HistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetRelayStatsUseCase {
    pub fn new(
        repository: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self) -> RelayStats {
        RelayStats {
            connections: self.message_pusher.connection_count().await,
            history_len: self.repository.count().await,
            history_capacity: self.repository.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, ConnectionId, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryHistoryRepository,
        },
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_stats_reflect_connections_and_history() {
        // テスト項目: 接続数・履歴件数・容量が返される
        // given (前提条件):
        let repository = Arc::new(InMemoryHistoryRepository::new(10));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionId::generate(), tx).await;
        repository
            .append(ChatMessage::new("a", "🤖", "x", Timestamp::new("t")))
            .await;
        let usecase = GetRelayStatsUseCase::new(repository, pusher);

        // when (操作):
        let stats = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            stats,
            RelayStats {
                connections: 1,
                history_len: 1,
                history_capacity: 10,
            }
        );
    }
}
