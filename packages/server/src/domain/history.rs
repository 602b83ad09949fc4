//! 履歴バッファ
//!
//! 容量固定の FIFO。容量いっぱいの状態で追加すると最も古いメッセージを捨てる。

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// 新規接続に送る履歴の既定の最大件数
pub const HISTORY_CAPACITY: usize = 100;

/// 容量上限付きのメッセージ履歴
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl HistoryBuffer {
    /// 既定容量（[`HISTORY_CAPACITY`]）で作成
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// 容量を指定して作成
    ///
    /// 容量 0 は 1 に切り上げる（直近 1 件は必ず残る）。
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// メッセージを追加し、容量を超える場合は最も古いメッセージを取り除いて返す
    pub fn push_evict_oldest(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        let evicted = if self.messages.len() == self.capacity {
            self.messages.pop_front()
        } else {
            None
        };
        self.messages.push_back(message);
        evicted
    }

    /// 現在の履歴を古い順に複製して返す
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
