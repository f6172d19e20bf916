//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::ui::state::AppState;

/// Snapshot of the server state (for debugging/testing purposes)
#[derive(Debug, Serialize)]
pub struct DebugState {
    /// Active session ids, in join order
    pub sessions: Vec<String>,
    /// Number of messages currently held in history
    pub history_len: usize,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to inspect current sessions and history size
pub async fn debug_state(State(state): State<Arc<AppState>>) -> Json<DebugState> {
    Json(DebugState {
        sessions: state
            .registry
            .active_ids()
            .into_iter()
            .map(|id| id.into_string())
            .collect(),
        history_len: state.store.len(),
    })
}
