//! ドメイン層
//!
//! リレーのビジネスルール（履歴バッファ、配信イベント）と、
//! 外部へのインターフェース（Repository / MessagePusher trait）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod history;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::ChatMessage;
pub use error::MessagePushError;
pub use event::RelayEvent;
pub use history::{HISTORY_CAPACITY, HistoryBuffer};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::HistoryRepository;
pub use value_object::{ConnectionId, Timestamp};
