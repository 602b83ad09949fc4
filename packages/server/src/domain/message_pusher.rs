//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信（通知）の抽象化。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RelayEvent};

/// クライアントへの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 接続中クライアントの集合（ConnectionSet）を保持し、イベントを配信する。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;

    /// 接続中の全クライアントにイベントを配信
    ///
    /// `exclude` に指定した接続には送らない（`None` なら送信者を含む全員）。
    /// 一部の送信失敗は許容し、実際に送れた件数を返す。
    async fn broadcast(
        &self,
        event: &RelayEvent,
        exclude: Option<&ConnectionId>,
    ) -> Result<usize, MessagePushError>;

    /// 登録中のクライアント数
    async fn connection_count(&self) -> usize;
}
