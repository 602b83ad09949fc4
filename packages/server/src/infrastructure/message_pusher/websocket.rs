//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理（ConnectionSet）
//! - `RelayEvent` を JSON にエンコードしてクライアントへ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 受信側（WebSocket の書き込みタスク）が終了していれば送信は失敗し、その接続は
//! 閉じているものとして扱います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RelayEvent},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// イベントをワイヤ形式の JSON にエンコード
    fn encode(event: &RelayEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(event))
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Pushed '{}' event to connection '{}'",
            event.kind(),
            connection_id
        );
        Ok(())
    }

    async fn broadcast(
        &self,
        event: &RelayEvent,
        exclude: Option<&ConnectionId>,
    ) -> Result<usize, MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for (connection_id, sender) in clients.iter() {
            if exclude == Some(connection_id) {
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容（閉じた接続はスキップ）
            match sender.send(content.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::debug!(
                    "Connection '{}' is closed, skipping '{}' broadcast",
                    connection_id,
                    event.kind()
                ),
            }
        }

        Ok(delivered)
    }

    async fn connection_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, Timestamp};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のクライアントへの送信
    // - broadcast: 送信者を含む配信 / 送信者を除く配信
    // - 閉じた接続のスキップ
    //
    // 【なぜこのテストが必要か】
    // - message は送信者を含む全員へ、typing は送信者以外へ届く必要がある
    // - 閉じた接続があっても残りの接続への配信が止まらないことを保証する
    // ========================================

    fn hello() -> RelayEvent {
        RelayEvent::Message(ChatMessage::new(
            "alice",
            "🐱",
            "hello",
            Timestamp::new("2024-01-01T00:00:00.000Z"),
        ))
    }

    async fn register(
        pusher: &WebSocketMessagePusher,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        pusher.register_client(id, tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにエンコード済みイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx) = register(&pusher).await;

        // when (操作):
        let result = pusher.push_to(&alice, &RelayEvent::History(vec![])).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"type":"history","data":[]}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&ConnectionId::generate(), &hello()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_push_to_closed_connection_fails() {
        // テスト項目: 受信側が閉じた接続への送信は PushFailed になる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, rx) = register(&pusher).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&alice, &hello()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_includes_sender_when_not_excluded() {
        // テスト項目: exclude なしのブロードキャストは送信者を含む全員に届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (_alice, mut rx_alice) = register(&pusher).await;
        let (_bob, mut rx_bob) = register(&pusher).await;

        // when (操作):
        let delivered = pusher.broadcast(&hello(), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 2);
        let alice_frame = rx_alice.recv().await.unwrap();
        let bob_frame = rx_bob.recv().await.unwrap();
        assert_eq!(alice_frame, bob_frame);
        assert!(alice_frame.contains(r#""type":"message""#));
    }

    #[tokio::test]
    async fn test_broadcast_excludes_sender() {
        // テスト項目: exclude を指定すると、その接続以外の全員に届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx_alice) = register(&pusher).await;
        let (_bob, mut rx_bob) = register(&pusher).await;
        let (_carol, mut rx_carol) = register(&pusher).await;
        let typing = RelayEvent::Typing {
            user: "alice".to_string(),
        };

        // when (操作):
        let delivered = pusher.broadcast(&typing, Some(&alice)).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(
            rx_bob.recv().await,
            Some(r#"{"type":"typing","user":"alice"}"#.to_string())
        );
        assert!(rx_carol.recv().await.is_some());
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_connections() {
        // テスト項目: 閉じた接続はスキップされ、残りの接続には届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (_alice, rx_alice) = register(&pusher).await;
        let (_bob, mut rx_bob) = register(&pusher).await;
        drop(rx_alice);

        // when (操作):
        let delivered = pusher.broadcast(&hello(), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert!(rx_bob.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        // テスト項目: 登録解除した接続にはブロードキャストが届かない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx_alice) = register(&pusher).await;
        let (_bob, _rx_bob) = register(&pusher).await;

        // when (操作):
        pusher.unregister_client(&alice).await;
        let delivered = pusher.broadcast(&hello(), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(pusher.connection_count().await, 1);
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_with_no_connections() {
        // テスト項目: 接続がなくてもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(&hello(), None).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
    }
}
