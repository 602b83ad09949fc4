//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use parlor_shared::time::{Clock, SystemClock};
use tokio::sync::mpsc;

use crate::{
    domain::{Profile, ReconnectBudget},
    error::ClientError,
    formatter::MessageFormatter,
    session::{ChatSession, SessionUpdate},
    transport::{self, EventSink, EventStream},
    ui::{InputEvent, prompt_for, redisplay_prompt, spawn_input_thread},
};

/// Runtime settings for the client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay WebSocket URL
    pub url: String,
    pub profile: Profile,
    /// Reconnections tried after a dropped connection (0 disables reconnection)
    pub max_reconnect_attempts: u32,
    pub reconnect_interval: Duration,
}

/// Run the chat client until the user quits or reconnection gives up
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let prompt = prompt_for(&config.profile);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 入力スレッドは再接続をまたいで使い回す
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<InputEvent>();
    let _input_thread = spawn_input_thread(prompt.clone(), input_tx);

    let mut budget = ReconnectBudget::new(config.max_reconnect_attempts);

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {})",
            config.url,
            config.profile.name(),
            budget.used() + 1
        );

        let result = match transport::connect(&config.url).await {
            Ok((sink, stream)) => {
                // 連続した失敗だけを数える
                budget.reset();
                println!(
                    "\nYou are {} {}. Type messages and press Enter to send. Press Ctrl+D to exit.",
                    config.profile.avatar(),
                    config.profile.name()
                );
                let session = ChatSession::new(config.profile.clone(), sink, clock.clone());
                run_client_session(session, stream, &mut input_rx, &prompt).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);

                if !budget.try_consume() {
                    if budget.max() > 0 {
                        tracing::error!(
                            "Failed to reconnect after {} attempts. Exiting.",
                            budget.max()
                        );
                    }
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    config.reconnect_interval.as_secs(),
                    budget.used(),
                    budget.max()
                );
                tokio::time::sleep(config.reconnect_interval).await;
            }
        }
    }
}

/// Drive one connection: render relay events and forward user input.
///
/// Returns `Ok(())` when the user closes the input, and an error when the
/// connection drops.
pub async fn run_client_session<S: EventSink>(
    mut session: ChatSession<S>,
    mut stream: EventStream,
    input_rx: &mut mpsc::UnboundedReceiver<InputEvent>,
    prompt: &str,
) -> Result<(), ClientError> {
    let mut typing_rx = session.typing_indicator().subscribe();
    let mut shown_typing = String::new();

    loop {
        tokio::select! {
            event = stream.next_event() => {
                let event = match event {
                    Some(event) => event?,
                    None => {
                        return Err(ClientError::ConnectionError(
                            "connection closed by relay".to_string(),
                        ));
                    }
                };
                match session.apply(event) {
                    SessionUpdate::HistoryReplaced { .. } => {
                        print!(
                            "{}",
                            MessageFormatter::format_history(
                                session.messages(),
                                session.profile().name()
                            )
                        );
                        redisplay_prompt(prompt);
                    }
                    SessionUpdate::MessageAppended(message) => {
                        print!(
                            "{}",
                            MessageFormatter::format_message(&message, session.profile().name())
                        );
                        redisplay_prompt(prompt);
                    }
                    // 表示は typing_rx 側で行う
                    SessionUpdate::TypingStarted(_) => {}
                }
            }
            input = input_rx.recv() => {
                match input {
                    Some(InputEvent::Line(text)) => {
                        if !session.send_message(&text).await? {
                            tracing::debug!("Skipping blank message");
                        }
                    }
                    Some(InputEvent::Keystroke) => session.notify_typing().await?,
                    None => return Ok(()),
                }
            }
            Ok(()) = typing_rx.changed() => {
                let current = typing_rx.borrow_and_update().clone();
                if !current.is_empty() && current != shown_typing {
                    print!("{}", MessageFormatter::format_typing(&current));
                    redisplay_prompt(prompt);
                }
                shown_typing = current;
            }
        }
    }
}
