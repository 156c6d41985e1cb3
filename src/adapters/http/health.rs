//! Liveness probe endpoint.
//!
//! Answers independently of the relay's connection protocol so that process
//! supervisors can probe the server without opening a WebSocket.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Health probe response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /health` - report process liveness.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

/// Create the health router.
pub fn health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
