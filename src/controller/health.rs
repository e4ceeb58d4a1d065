//! Liveness and retry-queue introspection endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::scheduler::retry::QueueStatus;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    /// Snapshot of the outbound retry queue.
    pub retry_queue: QueueStatus,
}

/// Handles `GET /api/health`.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthDto {
        status: "ok",
        retry_queue: state.scheduler.queue_status(),
    })
}
