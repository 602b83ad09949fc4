//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryHistoryRepository,
    },
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase, GetRelayStatsUseCase,
        NotifyTypingUseCase, RelaySequencer, SendMessageUseCase,
    },
};

use super::{
    handler::{get_history, get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay
///
/// # Example
///
/// ```ignore
/// let server = Server::with_in_memory_store(100);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance from its use cases
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        notify_typing_usecase: Arc<NotifyTypingUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        get_relay_stats_usecase: Arc<GetRelayStatsUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_client_usecase,
                disconnect_client_usecase,
                send_message_usecase,
                notify_typing_usecase,
                get_history_usecase,
                get_relay_stats_usecase,
            }),
        }
    }

    /// Wire a server backed by the in-memory history and the WebSocket pusher.
    ///
    /// # Arguments
    ///
    /// * `history_capacity` - Maximum number of messages replayed to new connections
    pub fn with_in_memory_store(history_capacity: usize) -> Self {
        // 1. Repository (in-memory history)
        let repository = Arc::new(InMemoryHistoryRepository::new(history_capacity));

        // 2. MessagePusher (WebSocket implementation, owns the ConnectionSet)
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 3. UseCases (all mutating use cases share one sequencer)
        let sequencer = Arc::new(RelaySequencer::new());
        Self::new(
            Arc::new(ConnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            Arc::new(DisconnectClientUseCase::new(
                message_pusher.clone(),
                sequencer.clone(),
            )),
            Arc::new(SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            Arc::new(NotifyTypingUseCase::new(message_pusher.clone(), sequencer)),
            Arc::new(GetHistoryUseCase::new(repository.clone())),
            Arc::new(GetRelayStatsUseCase::new(repository, message_pusher)),
        )
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/history", get(get_history))
            .route("/api/stats", get(get_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the relay until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
