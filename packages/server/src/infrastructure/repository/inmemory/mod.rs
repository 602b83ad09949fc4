//! インメモリ実装（プロセス終了とともに破棄される）

pub mod history;

pub use history::InMemoryHistoryRepository;
