//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// Avatars offered on the name-entry screen
pub const AVATAR_CHOICES: [&str; 5] = ["🐱", "🐶", "🧑‍💻", "🤖", "👻"];

/// Avatar used when none is chosen
pub const DEFAULT_AVATAR: &str = "🧑‍💻";

/// Local identity picked before chatting. Never sent on its own; it only
/// travels inside chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    avatar: &'static str,
}

impl Profile {
    /// Build a profile from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyName`] or [`ClientError::UnknownAvatar`].
    pub fn new(name: &str, avatar: &str) -> Result<Self, ClientError> {
        Ok(Self {
            name: validate_name(name)?,
            avatar: parse_avatar(avatar)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar(&self) -> &str {
        self.avatar
    }
}

/// Trim a display name and reject it if nothing is left.
pub fn validate_name(input: &str) -> Result<String, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Resolve an avatar from its glyph or its 1-based position in [`AVATAR_CHOICES`].
///
/// Blank input selects [`DEFAULT_AVATAR`].
pub fn parse_avatar(input: &str) -> Result<&'static str, ClientError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_AVATAR);
    }
    if let Some(glyph) = AVATAR_CHOICES.iter().copied().find(|glyph| *glyph == input) {
        return Ok(glyph);
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| AVATAR_CHOICES.get(index).copied())
        .ok_or_else(|| ClientError::UnknownAvatar(input.to_string()))
}

/// Decide whether composed text should be sent.
///
/// Blank text is dropped unless it carries an emoji.
pub fn should_send(text: &str) -> bool {
    !text.trim().is_empty() || contains_emoji(text)
}

pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// Code-point test for pictographic emoji.
///
/// Covers the emoji blocks of the Supplementary Multilingual Plane (which
/// include regional-indicator flags and skin-tone modifiers), the
/// miscellaneous symbols and dingbats blocks, and the scattered BMP code
/// points that default to emoji presentation. Joiners, variation selectors
/// and the keycap base characters (digits, `#`, `*`) are not emoji on their own.
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x00A9
            | 0x00AE
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x2139
            | 0x2194..=0x2199
            | 0x21A9..=0x21AA
            | 0x231A..=0x231B
            | 0x2328
            | 0x23CF
            | 0x23E9..=0x23F3
            | 0x23F8..=0x23FA
            | 0x24C2
            | 0x25AA..=0x25AB
            | 0x25B6
            | 0x25C0
            | 0x25FB..=0x25FE
            | 0x2600..=0x27BF
            | 0x2934..=0x2935
            | 0x2B05..=0x2B07
            | 0x2B1B..=0x2B1C
            | 0x2B50
            | 0x2B55
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
            | 0x1F000..=0x1FAFF
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The number of reconnections already made
/// * `max_attempts` - The maximum number of reconnection attempts allowed (0 disables reconnection)
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

/// Consecutive connection failures counted against the reconnect limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectBudget {
    used: u32,
    max: u32,
}

impl ReconnectBudget {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            used: 0,
            max: max_attempts,
        }
    }

    /// A connection was established; earlier failures no longer count.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Spend one reconnection attempt. Returns `false` once the limit is reached.
    pub fn try_consume(&mut self) -> bool {
        if !should_attempt_reconnect(self.used, self.max) {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}
