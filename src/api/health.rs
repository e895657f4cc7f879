//! Root and health endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Value, json};

use super::ApiState;
use crate::observability::metrics;

/// `GET /` — service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "siemulate security training API",
        "status": "running",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "features": ["simulations", "quizzes", "learning"],
    }))
}

/// `GET /health` — liveness plus a few counters.
pub async fn health(State(state): State<Arc<ApiState>>) -> Json<Value> {
    let uptime = state.started_at.elapsed();
    metrics::set_uptime(uptime);

    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "active_sessions": state.engine.session_count(),
        "uptime_seconds": uptime.as_secs(),
    }))
}
