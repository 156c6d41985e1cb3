//! Chat Relay - Real-Time Room Message Relay
//!
//! Clients join named rooms over a persistent WebSocket connection; chat
//! messages fan out to every other member of the same room, join/leave
//! events surface as system messages, and room-occupancy counts are
//! broadcast after every membership change.

pub mod adapters;
pub mod config;
pub mod domain;
