//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{http::RelayStatsDto, websocket::ChatMessage},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current history, oldest first (for debugging)
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessage>> {
    let history = state.get_history_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(history.into_iter().map(Into::into).collect())
}

/// Connection count and history occupancy
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RelayStatsDto> {
    let stats = state.get_relay_stats_usecase.execute().await;

    Json(RelayStatsDto {
        connections: stats.connections,
        history_len: stats.history_len,
        history_capacity: stats.history_capacity,
    })
}
