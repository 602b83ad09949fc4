//! Conversion logic between DTOs and domain entities.

use crate::domain::{RelayEvent, Timestamp, entity};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::ChatMessage> for entity::ChatMessage {
    fn from(dto: dto::ChatMessage) -> Self {
        Self {
            user: dto.user,
            avatar: dto.avatar,
            text: dto.text,
            timestamp: Timestamp::new(dto.timestamp),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::ChatMessage {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            user: model.user,
            avatar: model.avatar,
            text: model.text,
            timestamp: model.timestamp.into_string(),
        }
    }
}

impl From<&RelayEvent> for dto::ServerEvent {
    fn from(event: &RelayEvent) -> Self {
        match event {
            RelayEvent::History(messages) => dto::ServerEvent::History {
                data: messages.iter().cloned().map(Into::into).collect(),
            },
            RelayEvent::Message(message) => dto::ServerEvent::Message {
                data: message.clone().into(),
            },
            RelayEvent::Typing { user } => dto::ServerEvent::Typing { user: user.clone() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_message(text: &str) -> entity::ChatMessage {
        entity::ChatMessage::new("bob", "🐶", text, Timestamp::new("2024-01-01T00:00:00.000Z"))
    }

    #[test]
    fn test_dto_chat_message_to_domain() {
        // テスト項目: DTO の ChatMessage がドメインエンティティに変換される
        // given (前提条件):
        let dto_msg = dto::ChatMessage {
            user: "alice".to_string(),
            avatar: "🐱".to_string(),
            text: "Hello!".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        };

        // when (操作):
        let domain_msg: entity::ChatMessage = dto_msg.into();

        // then (期待する結果):
        assert_eq!(domain_msg.user, "alice");
        assert_eq!(domain_msg.avatar, "🐱");
        assert_eq!(domain_msg.text, "Hello!");
        assert_eq!(domain_msg.timestamp.as_str(), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_relay_event_history_to_dto_keeps_order() {
        // テスト項目: History イベントが順序を保ったまま DTO に変換される
        // given (前提条件):
        let event = RelayEvent::History(vec![domain_message("one"), domain_message("two")]);

        // when (操作):
        let dto_event = dto::ServerEvent::from(&event);

        // then (期待する結果):
        match dto_event {
            dto::ServerEvent::History { data } => {
                let texts: Vec<&str> = data.iter().map(|m| m.text.as_str()).collect();
                assert_eq!(texts, vec!["one", "two"]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_relay_event_message_and_typing_to_dto() {
        // テスト項目: Message / Typing イベントが対応する DTO に変換される
        // when (操作):
        let message = dto::ServerEvent::from(&RelayEvent::Message(domain_message("hey")));
        let typing = dto::ServerEvent::from(&RelayEvent::Typing {
            user: "bob".to_string(),
        });

        // then (期待する結果):
        assert_eq!(
            message,
            dto::ServerEvent::Message {
                data: dto::ChatMessage {
                    user: "bob".to_string(),
                    avatar: "🐶".to_string(),
                    text: "hey".to_string(),
                    timestamp: "2024-01-01T00:00:00.000Z".to_string(),
                }
            }
        );
        assert_eq!(
            typing,
            dto::ServerEvent::Typing {
                user: "bob".to_string()
            }
        );
    }
}
