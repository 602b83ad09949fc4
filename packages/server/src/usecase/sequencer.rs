//! リレー操作の直列化
//!
//! 「履歴への追加 + 配信」と「登録 + 履歴送信」をそれぞれ一塊で実行するためのゲート。
//! マルチスレッドのランタイム上でも、全クライアントが履歴と同じ順序でメッセージを受け取り、
//! 新規接続は履歴のあとに、その時点以降に追加されたメッセージだけを受け取る。

use tokio::sync::{Mutex, MutexGuard};

/// リレーの状態を変更する UseCase が共有するゲート
#[derive(Debug, Default)]
pub struct RelaySequencer {
    gate: Mutex<()>,
}

impl RelaySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// ゲートに入る（ガードを破棄するまで他の操作は待機する）
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
