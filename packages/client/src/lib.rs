//! Parlor terminal chat client.
//!
//! Connects to the relay, renders history and live messages, and sends
//! messages and typing signals composed at a line editor prompt.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod transport;
pub mod typing;
pub mod ui;

pub use runner::{ClientConfig, run_client};
