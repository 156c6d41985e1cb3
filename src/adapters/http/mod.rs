//! HTTP adapters - endpoints outside the WebSocket protocol.

pub mod health;

pub use health::{health_router, HealthResponse};
