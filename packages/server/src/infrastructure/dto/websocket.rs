//! WebSocket event envelopes.
//!
//! Every frame is one JSON object with a `type` discriminator:
//!
//! ```text
//! client -> relay  {"type":"message","data":{...ChatMessage}}
//! client -> relay  {"type":"typing","user":"alice"}
//! relay -> client  {"type":"history","data":[...ChatMessage]}
//! relay -> client  {"type":"message","data":{...ChatMessage}}
//! relay -> client  {"type":"typing","user":"alice"}
//! ```

use serde::{Deserialize, Serialize};

/// Chat message as it travels on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user: String,
    pub avatar: String,
    pub text: String,
    /// ISO-8601 timestamp set by the sending client
    pub timestamp: String,
}

/// Events sent from a client to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientEvent {
    Message { data: ChatMessage },
    Typing { user: String },
}

/// Events sent from the relay to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    History { data: Vec<ChatMessage> },
    Message { data: ChatMessage },
    Typing { user: String },
}
