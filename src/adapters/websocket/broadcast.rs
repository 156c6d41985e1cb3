//! Room broadcaster: best-effort fan-out to the members of one room.
//!
//! Membership is resolved from the registry at call time; the broadcast then
//! runs to completion against that snapshot. A member who leaves mid-call may
//! or may not receive that particular envelope, which is accepted as benign.
//! Delivery is independent per member: an unsendable connection is skipped
//! and never aborts delivery to the rest of the room.

use std::sync::Arc;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::RoomCode;

use super::messages::{MessageBody, RoomInfoBody, ServerMessage};
use super::registry::ConnectionRegistry;

/// Delivers envelopes to every sendable member of a room.
pub struct RoomBroadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl RoomBroadcaster {
    /// Create a broadcaster over the given registry.
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Broadcast a chat or system message to every sendable member of `room`.
    pub async fn broadcast_message(&self, room: &RoomCode, message: ChatMessage) {
        let envelope = ServerMessage::Message(MessageBody::from(message));
        self.deliver(room, envelope).await;
    }

    /// Broadcast the room's current occupancy to every sendable member.
    ///
    /// Invoked after every join and every leave, never on chat messages.
    pub async fn broadcast_room_info(&self, room: &RoomCode) {
        let members = self.registry.members_of(room).await;
        let envelope = ServerMessage::RoomInfo(RoomInfoBody {
            room_code: room.clone(),
            user_count: members.len(),
        });

        tracing::debug!(room = %room, user_count = members.len(), "broadcasting room info");
        for member in &members {
            if member.handle.is_open() {
                member.handle.send(envelope.clone());
            }
        }
    }

    async fn deliver(&self, room: &RoomCode, envelope: ServerMessage) {
        let members = self.registry.members_of(room).await;

        tracing::trace!(room = %room, recipients = members.len(), "broadcasting to room");
        for member in &members {
            // The open check races with a concurrent close; send treats that
            // the same as already-closed and drops the envelope.
            if member.handle.is_open() {
                member.handle.send(envelope.clone());
            }
        }
    }
}
