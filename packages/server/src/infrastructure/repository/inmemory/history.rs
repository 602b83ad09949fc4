//! InMemory History Repository 実装
//!
//! ドメイン層が定義する HistoryRepository trait の具体的な実装。
//! HistoryBuffer をそのままインメモリ DB として使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryBuffer, HistoryRepository};

/// インメモリ History Repository 実装
pub struct InMemoryHistoryRepository {
    /// 履歴バッファ
    buffer: Mutex<HistoryBuffer>,
    /// 容量（ロックなしで参照できるよう保持）
    capacity: usize,
}

impl InMemoryHistoryRepository {
    /// 容量を指定して空の履歴を作成
    pub fn new(capacity: usize) -> Self {
        let buffer = HistoryBuffer::with_capacity(capacity);
        let capacity = buffer.capacity();
        Self {
            buffer: Mutex::new(buffer),
            capacity,
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new(crate::domain::HISTORY_CAPACITY)
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, message: ChatMessage) -> Option<ChatMessage> {
        let mut buffer = self.buffer.lock().await;
        buffer.push_evict_oldest(message)
    }

    async fn snapshot(&self) -> Vec<ChatMessage> {
        let buffer = self.buffer.lock().await;
        buffer.snapshot()
    }

    async fn count(&self) -> usize {
        let buffer = self.buffer.lock().await;
        buffer.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryHistoryRepository の追加・取得
    // - 容量超過時に最も古いメッセージが捨てられること
    //
    // 【なぜこのテストが必要か】
    // - 履歴はリレーが保持する唯一の可変な共有状態
    // - 新規接続に送る履歴の正しさを保証する必要がある
    // ========================================

    fn message(text: &str) -> ChatMessage {
        ChatMessage::new(
            "alice",
            "🐱",
            text,
            Timestamp::new("2024-01-01T00:00:00.000Z"),
        )
    }

    #[tokio::test]
    async fn test_append_and_snapshot() {
        // テスト項目: 追加したメッセージが順序通りに取得できる
        // given (前提条件):
        let repo = InMemoryHistoryRepository::default();

        // when (操作):
        repo.append(message("first")).await;
        repo.append(message("second")).await;

        // then (期待する結果):
        let snapshot = repo.snapshot().await;
        assert_eq!(snapshot, vec![message("first"), message("second")]);
        assert_eq!(repo.count().await, 2);
        assert_eq!(repo.capacity(), 100);
    }

    #[tokio::test]
    async fn test_append_over_capacity_returns_evicted() {
        // テスト項目: 容量超過時に追い出されたメッセージが返される
        // given (前提条件):
        let repo = InMemoryHistoryRepository::new(2);
        repo.append(message("one")).await;
        repo.append(message("two")).await;

        // when (操作):
        let evicted = repo.append(message("three")).await;

        // then (期待する結果):
        assert_eq!(evicted, Some(message("one")));
        assert_eq!(
            repo.snapshot().await,
            vec![message("two"), message("three")]
        );
    }

    #[tokio::test]
    async fn test_empty_repository() {
        // テスト項目: 作成直後の履歴は空
        // when (操作):
        let repo = InMemoryHistoryRepository::new(5);

        // then (期待する結果):
        assert!(repo.snapshot().await.is_empty());
        assert_eq!(repo.count().await, 0);
        assert_eq!(repo.capacity(), 5);
    }
}
