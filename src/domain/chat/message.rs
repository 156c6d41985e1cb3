//! Transient chat and system messages.
//!
//! A message exists only for the duration of one broadcast: the relay keeps
//! no history. Any retention lives in each client's own view.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};

/// Author name used for relay-generated system messages.
pub const SYSTEM_AUTHOR: &str = "System";

/// Whether a message was written by a member or generated by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Chat,
    System,
}

/// One chat or system notice, built per event and broadcast once.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: String,
    pub body: String,
    pub sent_at: Timestamp,
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Creates a chat message authored by a member.
    ///
    /// The body is passed through as the member wrote it; emptiness checks
    /// happen at the dispatch layer before a message is ever built.
    pub fn chat(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            author: author.into(),
            body: body.into(),
            sent_at: Timestamp::now(),
            kind: MessageKind::Chat,
        }
    }

    /// Creates a relay-generated system notice.
    pub fn system(body: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            author: SYSTEM_AUTHOR.to_string(),
            body: body.into(),
            sent_at: Timestamp::now(),
            kind: MessageKind::System,
        }
    }

    /// System notice announcing a member joining their room.
    pub fn joined(username: &str) -> Self {
        Self::system(format!("{} joined the room", username))
    }

    /// System notice announcing a member leaving their room.
    pub fn left(username: &str) -> Self {
        Self::system(format!("{} left the room", username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_carries_author_and_kind() {
        let msg = ChatMessage::chat("Alice", "hi");
        assert_eq!(msg.author, "Alice");
        assert_eq!(msg.body, "hi");
        assert_eq!(msg.kind, MessageKind::Chat);
    }

    #[test]
    fn system_message_uses_system_author() {
        let msg = ChatMessage::system("maintenance soon");
        assert_eq!(msg.author, SYSTEM_AUTHOR);
        assert_eq!(msg.kind, MessageKind::System);
    }

    #[test]
    fn joined_and_left_notices_render_username() {
        assert_eq!(ChatMessage::joined("Alice").body, "Alice joined the room");
        assert_eq!(ChatMessage::left("Bob").body, "Bob left the room");
    }

    #[test]
    fn each_message_gets_a_fresh_id() {
        let a = ChatMessage::chat("Alice", "one");
        let b = ChatMessage::chat("Alice", "one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn message_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageKind::Chat).unwrap(),
            "\"chat\""
        );
        assert_eq!(
            serde_json::to_string(&MessageKind::System).unwrap(),
            "\"system\""
        );
    }
}
