//! Adapters - the relay's interfaces to the outside world.
//!
//! - `websocket` - connection handling, registry and room fan-out
//! - `http` - liveness probe

pub mod http;
pub mod websocket;

pub use websocket::{RelayState, RoomBroadcaster, ConnectionRegistry};
