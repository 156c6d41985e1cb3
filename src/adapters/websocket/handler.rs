//! WebSocket upgrade handler and per-connection event dispatch.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket and split the socket
//! 2. Spawn a send task draining the connection's outbound channel
//! 3. Process inbound frames in arrival order, each to completion
//! 4. On close or transport error, remove the membership and notify the room
//!
//! Frames that fail to parse are ignored without closing the connection, and
//! the relay never terminates a connection on its own.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::RoomCode;

use super::broadcast::RoomBroadcaster;
use super::messages::{ChatPayload, ClientMessage, JoinPayload, NotificationBody, ServerMessage};
use super::registry::{ClientHandle, ConnectionId, ConnectionRegistry};

/// Shared state for the relay: the registry and the broadcaster over it.
#[derive(Clone)]
pub struct RelayState {
    pub registry: Arc<ConnectionRegistry>,
    pub broadcaster: Arc<RoomBroadcaster>,
}

impl RelayState {
    /// Create a fresh registry with a broadcaster wired to it.
    pub fn new() -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let broadcaster = Arc::new(RoomBroadcaster::new(registry.clone()));
        Self {
            registry,
            broadcaster,
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection: forwards queued outbound
/// messages to the socket, dispatches inbound frames, and cleans up the
/// membership when either direction ends.
async fn handle_socket(socket: WebSocket, state: RelayState) {
    let (mut sender, mut receiver) = socket.split();

    let (client, mut outbound) = ClientHandle::channel();
    let connection = client.id();
    tracing::debug!(connection = %connection, "websocket connected");

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(connection = %connection, error = %e, "failed to encode outbound message");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let recv_client = client.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    dispatch_frame(&recv_state, &recv_client, &text).await;
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection = %recv_client.id(), "client sent close frame");
                    break;
                }
                Ok(_) => {
                    // Binary, ping and pong frames are ignored.
                }
                Err(e) => {
                    tracing::debug!(connection = %recv_client.id(), error = %e, "websocket receive error");
                    break;
                }
            }
        }
    });

    // Whichever direction finishes first tears down the other.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    handle_disconnect(&state, connection).await;
    tracing::debug!(connection = %connection, "websocket closed");
}

/// Parse one inbound frame and dispatch it.
///
/// Malformed or unparseable frames are dropped silently; the connection
/// stays open.
pub async fn dispatch_frame(state: &RelayState, client: &ClientHandle, frame: &str) {
    match serde_json::from_str::<ClientMessage>(frame) {
        Ok(ClientMessage::Join(payload)) => handle_join(state, client, payload).await,
        Ok(ClientMessage::Chat(payload)) => handle_chat(state, client, payload).await,
        Err(e) => {
            tracing::trace!(connection = %client.id(), error = %e, "ignoring unparseable frame");
        }
    }
}

/// Join transition: record the membership, then let the room know.
///
/// Re-joining replaces any prior membership for this connection. The room
/// sees a fresh occupancy snapshot and a system notice; the joining
/// connection additionally gets a private acknowledgment.
pub async fn handle_join(state: &RelayState, client: &ClientHandle, payload: JoinPayload) {
    let member = state
        .registry
        .upsert_member(client.clone(), payload.username, RoomCode::new(payload.room_code))
        .await;

    tracing::debug!(
        connection = %client.id(),
        member_id = %member.member_id,
        room = %member.room,
        "member joined"
    );

    state.broadcaster.broadcast_room_info(&member.room).await;
    state
        .broadcaster
        .broadcast_message(&member.room, ChatMessage::joined(&member.username))
        .await;

    client.send(ServerMessage::Notification(NotificationBody {
        message: "A user has joined the room".to_string(),
    }));
}

/// Chat transition: relay the message to the sender's room.
///
/// A chat from a connection with no recorded membership is ignored, as is a
/// message whose trimmed body is empty. Neither is an error.
pub async fn handle_chat(state: &RelayState, client: &ClientHandle, payload: ChatPayload) {
    let Some(member) = state.registry.find_by_connection(&client.id()).await else {
        tracing::trace!(connection = %client.id(), "ignoring chat from unjoined connection");
        return;
    };

    if payload.message.trim().is_empty() {
        return;
    }

    state
        .broadcaster
        .broadcast_message(&member.room, ChatMessage::chat(member.username, payload.message))
        .await;
}

/// Disconnect transition: drop the membership and notify the room.
///
/// Idempotent: a close for a connection that never joined, or that was
/// already removed, is a no-op.
pub async fn handle_disconnect(state: &RelayState, connection: ConnectionId) {
    let Some(member) = state.registry.remove_by_connection(&connection).await else {
        return;
    };

    tracing::debug!(
        connection = %connection,
        member_id = %member.member_id,
        room = %member.room,
        "member left"
    );

    state
        .broadcaster
        .broadcast_message(&member.room, ChatMessage::left(&member.username))
        .await;
    state.broadcaster.broadcast_room_info(&member.room).await;
}

/// Create the axum router for the relay endpoint.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .merge(relay_router())
///     .with_state(RelayState::new());
/// ```
pub fn relay_router() -> Router<RelayState> {
    Router::new().route("/ws", get(ws_handler))
}
