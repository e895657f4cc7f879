//! HTTP API: axum router, shared state, and error mapping.
//!
//! Handlers stay thin; every stateful operation goes through
//! [`Engine`](crate::engine::Engine). Failures serialize as
//! `{"detail": "<message>"}` with a matching status code.

pub mod health;
pub mod quiz;
pub mod scenarios;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use serde_json::json;
use tokio::time::Instant;

use crate::engine::Engine;
use crate::error::EngineError;

// ============================================================================
// State
// ============================================================================

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct ApiState {
    /// The scenario engine.
    pub engine: Arc<Engine>,
    /// Server start time, for uptime reporting.
    pub started_at: Instant,
}

impl ApiState {
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            started_at: Instant::now(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// API-level error, rendered as `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 404 with detail.
    NotFound(String),
    /// 400 with detail.
    BadRequest(String),
    /// 409 with detail.
    Conflict(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::SessionNotFound(_) | EngineError::EventNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            EngineError::SessionExists(_) => Self::Conflict(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            Self::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            Self::Conflict(detail) => (StatusCode::CONFLICT, detail),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the full API router.
///
/// `/scenarios/complex/available` and `/scenarios/complex/{session_id}`
/// overlap on the third segment; the router prefers the static segment, so
/// discovery never shadows a session route.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/scenarios/complex/available", get(scenarios::available))
        .route(
            "/scenarios/complex/{scenario_id}/start",
            post(scenarios::start),
        )
        .route(
            "/scenarios/complex/{session_id}/events",
            get(scenarios::events),
        )
        .route(
            "/scenarios/complex/{session_id}/respond",
            post(scenarios::respond),
        )
        .route(
            "/scenarios/complex/{session_id}/summary",
            get(scenarios::summary),
        )
        .route("/scenarios/complex/{session_id}", delete(scenarios::remove))
        .route("/quiz/questions", get(quiz::questions))
        .route("/quiz/submit", post(quiz::submit))
        .route("/quiz/categories", get(quiz::categories))
        .with_state(state)
}

// ============================================================================
// Tests
// ============================================================================
