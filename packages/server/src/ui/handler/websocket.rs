//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId, infrastructure::dto::websocket::ClientEvent, ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives encoded events from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the channel closes or the socket refuses a frame.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    let (sender, mut receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);

    // Register the connection and send it the current history
    match state.connect_client_usecase.execute(connection_id, tx).await {
        Ok(history_len) => {
            tracing::info!(
                "Connection '{}' opened, sent {} history message(s)",
                connection_id,
                history_len
            );
        }
        Err(e) => {
            tracing::warn!("Connection '{}' could not be opened: {}", connection_id, e);
            send_task.abort();
            return;
        }
    }

    let state_clone = state.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_text(&state_clone, &connection_id, text.as_str()).await
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Parse one text frame and route it to the matching use case.
///
/// Frames that do not parse as a client event are dropped; the connection stays open.
async fn dispatch_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::Message { data } => {
            tracing::debug!("Message from '{}' ({})", data.user, connection_id);
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id, data.into())
                .await
            {
                tracing::warn!("Failed to relay message: {}", e);
            }
        }
        ClientEvent::Typing { user } => {
            if let Err(e) = state
                .notify_typing_usecase
                .execute(connection_id, user)
                .await
            {
                tracing::warn!("Failed to relay typing: {}", e);
            }
        }
    }
}
