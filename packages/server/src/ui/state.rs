//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase, GetRelayStatsUseCase,
    NotifyTypingUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    pub get_relay_stats_usecase: Arc<GetRelayStatsUseCase>,
}
