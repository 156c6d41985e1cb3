//! WebSocket message types for the relay protocol.
//!
//! Defines the wire protocol between server and connected clients. Every
//! frame is a JSON object of shape `{type, payload}`:
//! - Client → Server: room joins, chat messages
//! - Server → Client: relayed messages, room occupancy, private notifications

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatMessage, MessageKind};
use crate::domain::foundation::{MessageId, RoomCode};

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Join a room under a display name.
    Join(JoinPayload),

    /// Send a chat message to the sender's current room.
    Chat(ChatPayload),
}

/// Payload of a `join` frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub username: String,
    pub room_code: String,
}

/// Payload of a `chat` frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub message: String,
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMessage {
    /// A chat or system message relayed to the room.
    Message(MessageBody),

    /// Room occupancy snapshot, sent after every join and leave.
    RoomInfo(RoomInfoBody),

    /// Private acknowledgment to a single connection.
    Notification(NotificationBody),
}

/// Wire form of a relayed message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub id: MessageId,
    pub username: String,
    pub message: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl From<ChatMessage> for MessageBody {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            username: message.author,
            message: message.body,
            timestamp: message.sent_at.to_rfc3339(),
            kind: message.kind,
        }
    }
}

/// Room occupancy snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfoBody {
    pub room_code: RoomCode,
    pub user_count: usize,
}

/// Private notification payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_message_deserializes_join() {
        let json = r#"{"type": "join", "payload": {"username": "Alice", "roomCode": "ROOM1"}}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        match msg {
            ClientMessage::Join(payload) => {
                assert_eq!(payload.username, "Alice");
                assert_eq!(payload.room_code, "ROOM1");
            }
            other => panic!("Expected join, got {:?}", other),
        }
    }

    #[test]
    fn client_message_deserializes_chat() {
        let json = r#"{"type": "chat", "payload": {"message": "hi"}}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        match msg {
            ClientMessage::Chat(payload) => assert_eq!(payload.message, "hi"),
            other => panic!("Expected chat, got {:?}", other),
        }
    }

    #[test]
    fn client_message_rejects_unknown_type() {
        let json = r#"{"type": "subscribe", "payload": {}}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn client_message_rejects_missing_payload_field() {
        let json = r#"{"type": "join", "payload": {"username": "Alice"}}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn server_message_serializes_with_type_and_payload() {
        let msg = ServerMessage::Message(MessageBody::from(ChatMessage::chat("Alice", "hi")));

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"message""#));
        assert!(json.contains(r#""payload":{"#));
        assert!(json.contains(r#""username":"Alice""#));
        assert!(json.contains(r#""message":"hi""#));
        assert!(json.contains(r#""type":"chat""#));
    }

    #[test]
    fn system_message_serializes_with_system_kind() {
        let msg = ServerMessage::Message(MessageBody::from(ChatMessage::joined("Alice")));

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""username":"System""#));
        assert!(json.contains(r#""message":"Alice joined the room""#));
        assert!(json.contains(r#""type":"system""#));
    }

    #[test]
    fn room_info_serializes_camel_case_fields() {
        let msg = ServerMessage::RoomInfo(RoomInfoBody {
            room_code: RoomCode::from("ROOM1"),
            user_count: 2,
        });

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"roomInfo""#));
        assert!(json.contains(r#""roomCode":"ROOM1""#));
        assert!(json.contains(r#""userCount":2"#));
    }

    #[test]
    fn notification_serializes_message_field() {
        let msg = ServerMessage::Notification(NotificationBody {
            message: "A user has joined the room".to_string(),
        });

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"notification""#));
        assert!(json.contains(r#""message":"A user has joined the room""#));
    }

    #[test]
    fn message_body_preserves_chat_message_fields() {
        let chat = ChatMessage::chat("Alice", "hello there");
        let id = chat.id;
        let body = MessageBody::from(chat);

        assert_eq!(body.id, id);
        assert_eq!(body.username, "Alice");
        assert_eq!(body.message, "hello there");
        assert_eq!(body.kind, MessageKind::Chat);
    }
}
