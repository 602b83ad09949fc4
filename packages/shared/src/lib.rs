//! Utilities shared by the Parlor relay and client.

pub mod logger;
pub mod time;
