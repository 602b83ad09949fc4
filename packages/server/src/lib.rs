//! Parlor chat relay.
//!
//! Accepts WebSocket connections, replays a bounded message history to each
//! new connection and fans out chat messages and typing notifications.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
