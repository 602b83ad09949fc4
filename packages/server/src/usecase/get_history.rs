//! UseCase: 履歴の参照

use std::sync::Arc;

use crate::domain::{ChatMessage, HistoryRepository};

/// 現在の履歴を取得するユースケース（HTTP のデバッグ用エンドポイントから利用）
pub struct GetHistoryUseCase {
    repository: Arc<dyn HistoryRepository>,
}

impl GetHistoryUseCase {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    /// 履歴を古い順に取得
    pub async fn execute(&self) -> Vec<ChatMessage> {
        self.repository.snapshot().await
    }
}
