//! Connection registry: the single source of truth for "who is where."
//!
//! One flat table maps each live connection to its membership (display name,
//! room, member id). Rooms are implicit: a room exists precisely while at
//! least one member carries its code, so there is nothing to create or
//! destroy. Membership queries scan the table per call; realistic room sizes
//! are small enough that a per-room index would buy nothing.
//!
//! # Thread Safety
//!
//! Every operation takes the table's `RwLock` exactly once, so each is
//! atomic: replacing a membership on re-join can never expose a transient
//! duplicate, and a membership scan can never observe a half-applied update.

use std::collections::HashMap;
use std::fmt;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::domain::foundation::{MemberId, RoomCode};

use super::messages::ServerMessage;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Create a new random connection ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The relay's view of one client connection.
///
/// Wraps the connection's outbound channel. The socket itself is owned by
/// the connection task; the relay only queues messages onto the channel and
/// never closes the socket except by dropping the handle on explicit leave.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ClientHandle {
    /// Create a handle together with the receiving end of its outbound
    /// channel. The connection task drains the receiver onto the socket.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                id: ConnectionId::new(),
                tx,
            },
            rx,
        )
    }

    /// The connection this handle belongs to.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether the connection is currently sendable.
    ///
    /// A send may still race with the connection closing; `send` treats that
    /// the same as "was already closed".
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Queue a message for delivery. Best-effort: a closed channel drops the
    /// message silently.
    pub fn send(&self, message: ServerMessage) {
        let _ = self.tx.send(message);
    }
}

/// One active participant: a connection's association with a display name
/// and a room.
#[derive(Debug, Clone)]
pub struct Member {
    pub member_id: MemberId,
    pub username: String,
    pub room: RoomCode,
    pub handle: ClientHandle,
}

/// Live mapping of connections to their room membership.
///
/// All mutations and queries are logically single-step; see the module docs
/// for the locking discipline.
pub struct ConnectionRegistry {
    members: RwLock<HashMap<ConnectionId, Member>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a membership for `handle`, replacing any prior membership for
    /// the same connection. Returns the new member.
    ///
    /// Never fails; username and room are taken as given.
    pub async fn upsert_member(
        &self,
        handle: ClientHandle,
        username: impl Into<String>,
        room: RoomCode,
    ) -> Member {
        let member = Member {
            member_id: MemberId::new(),
            username: username.into(),
            room,
            handle,
        };

        let mut members = self.members.write().await;
        members.insert(member.handle.id(), member.clone());
        member
    }

    /// Look up the current membership for a connection.
    pub async fn find_by_connection(&self, connection: &ConnectionId) -> Option<Member> {
        self.members.read().await.get(connection).cloned()
    }

    /// Delete and return the membership for a connection.
    ///
    /// Returns `None` if the connection never joined (e.g. a close arriving
    /// before any join), which callers treat as a no-op.
    pub async fn remove_by_connection(&self, connection: &ConnectionId) -> Option<Member> {
        self.members.write().await.remove(connection)
    }

    /// All current members of a room.
    ///
    /// Recomputed on every call; insertion order is irrelevant.
    pub async fn members_of(&self, room: &RoomCode) -> Vec<Member> {
        self.members
            .read()
            .await
            .values()
            .filter(|member| &member.room == room)
            .cloned()
            .collect()
    }

    /// Total member count across all rooms (for diagnostics).
    pub async fn total_members(&self) -> usize {
        self.members.read().await.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
