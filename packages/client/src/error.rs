//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Display name is empty after trimming
    #[error("Name must not be empty")]
    EmptyName,

    /// Avatar is not one of the offered choices
    #[error("Unknown avatar '{0}'")]
    UnknownAvatar(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Event could not be serialized
    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    /// Terminal input failed or was closed
    #[error("Input error: {0}")]
    Input(String),
}
