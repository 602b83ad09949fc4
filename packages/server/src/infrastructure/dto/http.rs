//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Relay runtime statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayStatsDto {
    /// Number of currently registered connections
    pub connections: usize,
    /// Number of messages currently held in history
    pub history_len: usize,
    /// Maximum number of messages held in history
    pub history_capacity: usize,
}
