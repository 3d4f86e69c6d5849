//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::{Connection, Frame};
use crate::handlers::{MessageRouter, RouteOutcome};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    // Register connection (replays the last gesture into its queue)
    let (connection, rx) = state.relay().accept();
    let session_id = connection.session_id().to_string();

    tracing::info!(
        session_id = %session_id,
        connections = state.relay().registry().connection_count(),
        "WebSocket connection established"
    );

    let (ws_sink, mut ws_stream) = socket.split();

    // Spawn task to send queued frames to the WebSocket
    let mut send_task = tokio::spawn(forward_frames(session_id.clone(), rx, ws_sink));

    // Spawn task to receive messages from the WebSocket
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text);
                }
                Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                    Ok(text) => handle_text_message(&state_recv, &connection_recv, text),
                    Err(e) => tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "Dropping non UTF-8 binary message"
                    ),
                },
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        session_id = %connection_recv.session_id(),
                        "Client closed connection"
                    );
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    // Whichever side finishes first tears down the other
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = &mut send_task => {
            recv_task.abort();
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    cleanup_connection(&state, &connection);
}

/// Drain the connection's queue into the socket
async fn forward_frames<S>(session_id: String, mut rx: mpsc::Receiver<Frame>, mut ws_sink: S)
where
    S: futures_util::Sink<Message> + Unpin,
{
    while let Some(frame) = rx.recv().await {
        if ws_sink.send(Message::Text(frame.to_string())).await.is_err() {
            tracing::warn!(session_id = %session_id, "Failed to send message to WebSocket");
            break;
        }
    }

    // Close the WebSocket when the queue is closed
    let _ = ws_sink.close().await;
}

/// Route a text frame; failures are logged and the connection stays open
fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    match MessageRouter::route(state.relay(), connection, text) {
        Ok(RouteOutcome::WindowUpdated(window)) => {
            tracing::info!(
                session_id = %connection.session_id(),
                %window,
                "Alert window changed"
            );
        }
        Ok(outcome) => {
            tracing::trace!(
                session_id = %connection.session_id(),
                outcome = ?outcome,
                "Message handled"
            );
        }
        Err(e) => {
            tracing::warn!(
                session_id = %connection.session_id(),
                code = e.code(),
                error = %e,
                "Dropping client message"
            );
        }
    }
}

/// Clean up a connection on disconnect
///
/// Close and error both end up here; removal is idempotent.
fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    let removed = state.relay().disconnect(connection.session_id());

    tracing::info!(
        session_id = %connection.session_id(),
        removed,
        age = ?connection.age(),
        frames_queued = connection.frames_queued(),
        connections = state.relay().registry().connection_count(),
        "Connection closed"
    );
}
