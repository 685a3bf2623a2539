//! WebSocket handler: registers the socket, pumps broadcasts out, feeds
//! pongs back to the registry.
//!
//! Clients send no application messages; the only inbound traffic that
//! matters is protocol Pong frames answering the sweep's Pings. Everything
//! the client sees arrives as the JSON envelopes built by the broadcast hub.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::realtime::registry::ConnectionRegistry;

/// GET /ws - upgrade to the live update stream.
pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(registry): State<ConnectionRegistry>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Drive a single WebSocket connection until it closes.
///
/// The connection is registered with an outbound channel; the sweep and the
/// broadcast hub write into that channel and this task forwards frames to
/// the socket. When the registry drops the sender (liveness termination)
/// the channel closes and the socket is shut down.
pub async fn handle_socket(socket: WebSocket, registry: ConnectionRegistry) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
    let id = registry.add(outbound_tx);

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(message) => {
                        if ws_tx.send(message).await.is_err() {
                            break;
                        }
                    }
                    // Swept out of the registry: close the transport.
                    None => break,
                }
            }
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Pong(_))) => registry.record_pong(&id),
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_tx.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(connection = %id, "websocket error: {e}");
                        break;
                    }
                    // Application messages from clients are ignored.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.remove(&id);
    let _ = ws_tx.close().await;
}
