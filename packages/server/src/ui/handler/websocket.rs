//! WebSocket connection handlers.

use std::{ops::ControlFlow, sync::Arc};

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
    domain::{ConnectionId, ConnectionIdFactory, RoomEvent},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (mut sender, mut receiver) = socket.split();

    // Register this connection's outbox so the registry can reach it
    let (tx, mut rx) = mpsc::unbounded_channel::<RoomEvent>();
    state.repository.attach(connection_id.clone(), tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    // Spawn a task to drain the outbox into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&ServerMessage::from(event)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Spawn a task to process this connection's frames one at a time
    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let flow =
                        handle_text_frame(&recv_state, &recv_connection_id, text.as_str()).await;
                    if flow.is_break() {
                        break;
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // The reader always finishes the frame it is handling, even when the
    // writer has already failed
    let recv_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if recv_finished {
        send_task.abort();
    } else if let Err(e) = recv_task.await {
        tracing::warn!("Receive task of '{}' failed: {}", connection_id, e);
    }

    state.leave_room().execute(&connection_id).await;
    state.repository.detach(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Handle one inbound text frame. Malformed frames are logged and ignored.
async fn handle_text_frame(
    state: &AppState,
    connection_id: &ConnectionId,
    text: &str,
) -> ControlFlow<()> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return ControlFlow::Continue(());
        }
    };

    match message {
        ClientMessage::Join(payload) => {
            // Rejections are reported to the client by the use case
            let _ = state.join_room().execute(connection_id, payload.username).await;
        }
        ClientMessage::SendMessage(payload) => {
            if let Err(e) = state.send_message().execute(connection_id, payload.message).await {
                tracing::warn!("Dropped message from '{}': {}", connection_id, e);
            }
        }
        ClientMessage::Leave => {
            state.leave_room().execute(connection_id).await;
        }
        ClientMessage::Disconnect => return ControlFlow::Break(()),
    }

    ControlFlow::Continue(())
}
