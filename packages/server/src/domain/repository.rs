//! Repository trait 定義
//!
//! ドメイン層が必要とする履歴ストアのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::ChatMessage;

/// History Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// メッセージを追加（容量超過時は最も古いものを捨てて返す）
    async fn append(&self, message: ChatMessage) -> Option<ChatMessage>;

    /// 現在の履歴を古い順に取得
    async fn snapshot(&self) -> Vec<ChatMessage>;

    /// 履歴の件数
    async fn count(&self) -> usize;

    /// 履歴の最大件数
    fn capacity(&self) -> usize;
}
