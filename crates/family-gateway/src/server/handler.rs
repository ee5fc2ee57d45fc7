//! WebSocket handler
//!
//! Accepts sockets and turns their open/close into presence transitions.

use crate::protocol::GatewayMessage;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use family_core::ConnectionId;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// Connection-time query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// WebSocket gateway handler
///
/// A query string that fails to parse counts as no user id.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    query: Option<Query<ConnectQuery>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let user_id = query.and_then(|Query(q)| q.user_id);
    ws.on_upgrade(move |socket| handle_socket(state, socket, user_id))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, user_id: Option<String>) {
    let connection_id = ConnectionId::generate();

    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);

    // Register before announcing so this socket receives its own status event
    state.connection_manager().add_connection(connection_id, tx);

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Spawn task to send messages to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match msg.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        error = %e,
                        "Failed to serialize message"
                    );
                    continue;
                }
            };
            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(
                    connection_id = %connection_id,
                    "Failed to send message to WebSocket"
                );
                break;
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    state
        .presence()
        .connect(user_id.as_deref(), connection_id)
        .await;

    // Spawn task to receive from WebSocket; client frames carry no commands
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_id, "Client closed connection");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    tracing::trace!(connection_id = %connection_id, "Ping/pong received");
                }
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    tracing::trace!(connection_id = %connection_id, "Ignoring client message");
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either side to finish, then stop the other
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
        }
        _ = &mut send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
            recv_task.abort();
        }
    }

    cleanup_connection(&state, connection_id).await;
}

/// Clean up a connection on disconnect
///
/// The socket leaves the broadcast set before the offline event goes out.
async fn cleanup_connection(state: &GatewayState, connection_id: ConnectionId) {
    tracing::info!(connection_id = %connection_id, "Cleaning up connection");

    state.connection_manager().remove_connection(&connection_id);
    state.presence().disconnect(connection_id).await;
}
