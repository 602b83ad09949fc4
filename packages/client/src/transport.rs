//! Connection handle to the relay.
//!
//! The outbound half is the [`EventSink`] trait so the session can be driven
//! by any transport (a WebSocket in production, a mock in tests).

use async_trait::async_trait;
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use parlor_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::error::ClientError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Outbound side of a relay connection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send {
    async fn send_event(&mut self, event: ClientEvent) -> Result<(), ClientError>;
}

/// [`EventSink`] writing JSON text frames to a WebSocket
pub struct WebSocketSink {
    inner: SplitSink<WsStream, Message>,
}

#[async_trait]
impl EventSink for WebSocketSink {
    async fn send_event(&mut self, event: ClientEvent) -> Result<(), ClientError> {
        let json = serde_json::to_string(&event)?;
        self.inner
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))
    }
}

/// Inbound side of a relay connection
pub struct EventStream {
    inner: SplitStream<WsStream>,
}

impl EventStream {
    /// Next relay event.
    ///
    /// Frames that are not valid relay events are skipped. Returns `None` once
    /// the relay closes the connection.
    pub async fn next_event(&mut self) -> Option<Result<ServerEvent, ClientError>> {
        while let Some(frame) = self.inner.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if let Some(event) = decode_server_event(text.as_str()) {
                        return Some(Ok(event));
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(ClientError::ConnectionError(e.to_string()))),
            }
        }
        None
    }
}

/// Parse a relay frame, logging and dropping anything malformed.
pub fn decode_server_event(text: &str) -> Option<ServerEvent> {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::debug!("Ignoring malformed frame from relay: {}", e);
            None
        }
    }
}

/// Open a WebSocket connection to the relay
pub async fn connect(url: &str) -> Result<(WebSocketSink, EventStream), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let (write, read) = ws_stream.split();

    Ok((WebSocketSink { inner: write }, EventStream { inner: read }))
}
