//! Client session state: the rendered conversation and the outbound actions.

use std::sync::Arc;

use parlor_server::infrastructure::dto::websocket::{ChatMessage, ClientEvent, ServerEvent};
use parlor_shared::time::Clock;

use crate::{
    domain::{Profile, should_send},
    error::ClientError,
    transport::EventSink,
    typing::TypingIndicator,
};

/// What changed after applying a relay event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The rendered list was replaced by the relay's history
    HistoryReplaced { count: usize },
    /// One message was appended to the rendered list
    MessageAppended(ChatMessage),
    /// The typing indicator now shows this user
    TypingStarted(String),
}

/// One user's view of the chat over one connection
pub struct ChatSession<S> {
    profile: Profile,
    sink: S,
    clock: Arc<dyn Clock>,
    messages: Vec<ChatMessage>,
    typing: TypingIndicator,
}

impl<S: EventSink> ChatSession<S> {
    pub fn new(profile: Profile, sink: S, clock: Arc<dyn Clock>) -> Self {
        Self::with_typing_indicator(profile, sink, clock, TypingIndicator::default())
    }

    pub fn with_typing_indicator(
        profile: Profile,
        sink: S,
        clock: Arc<dyn Clock>,
        typing: TypingIndicator,
    ) -> Self {
        Self {
            profile,
            sink,
            clock,
            messages: Vec::new(),
            typing,
        }
    }

    /// Apply one relay event to local state.
    ///
    /// History replaces the list wholesale, messages are appended as they
    /// arrive (never reordered or deduplicated), typing restarts the indicator.
    pub fn apply(&mut self, event: ServerEvent) -> SessionUpdate {
        match event {
            ServerEvent::History { data } => {
                self.messages = data;
                SessionUpdate::HistoryReplaced {
                    count: self.messages.len(),
                }
            }
            ServerEvent::Message { data } => {
                self.messages.push(data.clone());
                SessionUpdate::MessageAppended(data)
            }
            ServerEvent::Typing { user } => {
                self.typing.show(user.clone());
                SessionUpdate::TypingStarted(user)
            }
        }
    }

    /// Send composed text as a chat message.
    ///
    /// Returns `Ok(false)` without contacting the relay when the text is
    /// blank and carries no emoji.
    pub async fn send_message(&mut self, text: &str) -> Result<bool, ClientError> {
        if !should_send(text) {
            return Ok(false);
        }

        let message = ChatMessage {
            user: self.profile.name().to_string(),
            avatar: self.profile.avatar().to_string(),
            text: text.to_string(),
            timestamp: self.clock.now_iso8601(),
        };
        self.sink
            .send_event(ClientEvent::Message { data: message })
            .await?;
        Ok(true)
    }

    /// Tell the relay this user is typing. Sent on every keystroke.
    pub async fn notify_typing(&mut self) -> Result<(), ClientError> {
        self.sink
            .send_event(ClientEvent::Typing {
                user: self.profile.name().to_string(),
            })
            .await
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Rendered messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn typing_indicator(&self) -> &TypingIndicator {
        &self.typing
    }

    /// Name currently shown as typing, or an empty string
    pub fn typing_user(&self) -> String {
        self.typing.current()
    }
}
