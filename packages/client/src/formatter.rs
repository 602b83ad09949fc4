//! Message formatting utilities for terminal display.

use chrono::{Local, TimeZone};
use parlor_server::infrastructure::dto::websocket::ChatMessage;
use parlor_shared::time::format_time_of_day;

const RULE: &str = "------------------------------------------------------------";

/// Indentation pushing the user's own messages to the right-hand side
const OWN_MESSAGE_INDENT: &str = "                    ";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the history replayed on connect
    pub fn format_history(messages: &[ChatMessage], my_name: &str) -> String {
        Self::format_history_in(messages, my_name, &Local)
    }

    pub fn format_history_in<Tz>(messages: &[ChatMessage], my_name: &str, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut output = String::new();
        output.push('\n');
        output.push_str(RULE);
        output.push('\n');
        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            for message in messages {
                output.push_str(&Self::format_line(message, my_name, tz));
                output.push('\n');
            }
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a live chat message, marking the user's own ones
    pub fn format_message(message: &ChatMessage, my_name: &str) -> String {
        Self::format_message_in(message, my_name, &Local)
    }

    pub fn format_message_in<Tz>(message: &ChatMessage, my_name: &str, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format!("\n{}\n", Self::format_line(message, my_name, tz))
    }

    /// Format the typing indicator line
    pub fn format_typing(user: &str) -> String {
        format!("\n{} is typing...\n", user)
    }

    // 自分のメッセージはユーザー名で判定する（接続 ID はクライアントに渡らない）
    fn format_line<Tz>(message: &ChatMessage, my_name: &str, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let time =
            format_time_of_day(&message.timestamp, tz).unwrap_or_else(|| "--:--".to_string());
        if message.user == my_name {
            format!(
                "{}[{}] {} (me) {}: {}",
                OWN_MESSAGE_INDENT, time, message.avatar, message.user, message.text
            )
        } else {
            format!(
                "[{}] {} {}: {}",
                time, message.avatar, message.user, message.text
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn chat(user: &str, text: &str, timestamp: &str) -> ChatMessage {
        ChatMessage {
            user: user.to_string(),
            avatar: "🐶".to_string(),
            text: text.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_format_message_from_someone_else() {
        // テスト項目: 他人のメッセージは時刻・アバター・名前・本文で表示される
        // given (前提条件):
        let message = chat("bob", "hello", "2023-01-01T09:05:00.000Z");

        // when (操作):
        let result = MessageFormatter::format_message_in(&message, "alice", &Utc);

        // then (期待する結果):
        assert_eq!(result, "\n[09:05] 🐶 bob: hello\n");
    }

    #[test]
    fn test_format_own_message_is_marked() {
        // テスト項目: 自分のメッセージは右寄せされ (me) が付く
        // given (前提条件):
        let message = chat("alice", "hi", "2023-01-01T09:05:00.000Z");

        // when (操作):
        let result = MessageFormatter::format_message_in(&message, "alice", &Utc);

        // then (期待する結果):
        assert!(result.starts_with(&format!("\n{}[09:05]", OWN_MESSAGE_INDENT)));
        assert!(result.contains("(me) alice: hi"));
    }

    #[test]
    fn test_format_message_with_bad_timestamp() {
        // テスト項目: 解析できない時刻はプレースホルダーで表示される
        let message = chat("bob", "hello", "yesterday");
        let result = MessageFormatter::format_message_in(&message, "alice", &Utc);
        assert!(result.contains("[--:--]"));
    }

    #[test]
    fn test_format_empty_history() {
        // テスト項目: 履歴が空の場合はその旨を表示する
        let result = MessageFormatter::format_history_in(&[], "alice", &Utc);
        assert!(result.contains("(No messages yet)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_history_keeps_order() {
        // テスト項目: 履歴は古い順に表示される
        // given (前提条件):
        let messages = vec![
            chat("bob", "first", "2023-01-01T09:00:00.000Z"),
            chat("carol", "second", "2023-01-01T09:01:00.000Z"),
        ];

        // when (操作):
        let result = MessageFormatter::format_history_in(&messages, "alice", &Utc);

        // then (期待する結果):
        let first = result.find("first").unwrap();
        let second = result.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_format_typing() {
        // テスト項目: 入力中表示のフォーマット
        assert_eq!(
            MessageFormatter::format_typing("bob"),
            "\nbob is typing...\n"
        );
    }
}
