//! Health check endpoints.
//!
//! Used by load balancers and monitoring systems. A missing or unreachable
//! store is a supported mode, so neither endpoint fails because of it.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sviss_todo_store::KeyValueBackend;

use crate::state::AppState;

/// Body of `GET /health/ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    /// Always `"ok"`
    pub status: String,
    /// Whether the store answered the probe
    pub persistence: bool,
}

/// Simple health check endpoint (for basic liveness).
///
/// Does NOT check the store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness with the current persistence mode.
///
/// # Endpoint
///
/// ```text
/// GET /health/ready
/// ```
///
/// # Response
///
/// ```json
/// { "status": "ok", "persistence": true }
/// ```
pub async fn readiness_check<B>(State(state): State<AppState<B>>) -> Json<Readiness>
where
    B: KeyValueBackend + 'static,
{
    Json(Readiness {
        status: "ok".to_string(),
        persistence: state.persistence_available().await,
    })
}
