//! WebSocket adapters - the relay's connection, registry and fan-out core.
//!
//! Each client holds one persistent connection, joins a room, and receives
//! everything that happens in that room while it is a member.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Connection tasks                          │
//! │   one receive loop + one send task per WebSocket             │
//! └─────────────────────────────────────────────────────────────┘
//!            │ join / chat / disconnect            ▲ envelopes
//!            ▼                                     │
//! ┌──────────────────────────┐        ┌──────────────────────────┐
//! │    ConnectionRegistry     │◄───────│      RoomBroadcaster     │
//! │  connection → membership  │ members│  snapshot, then deliver  │
//! └──────────────────────────┘        └──────────────────────────┘
//!
//! Room: ROOM1              Room: ROOM2
//! ├── Alice                ├── Carol
//! └── Bob                  └── Dave
//! ```
//!
//! Rooms are implicit: they exist exactly while someone is in them.
//!
//! # Components
//!
//! - [`messages`] - the `{type, payload}` wire protocol
//! - [`registry`] - connection/membership table
//! - [`broadcast`] - best-effort room fan-out
//! - [`handler`] - axum upgrade handler and event dispatch

pub mod broadcast;
pub mod handler;
pub mod messages;
pub mod registry;

pub use broadcast::RoomBroadcaster;
pub use handler::{
    dispatch_frame, handle_chat, handle_disconnect, handle_join, relay_router, ws_handler,
    RelayState,
};
pub use messages::{
    ChatPayload, ClientMessage, JoinPayload, MessageBody, NotificationBody, RoomInfoBody,
    ServerMessage,
};
pub use registry::{ClientHandle, ConnectionId, ConnectionRegistry, Member};
