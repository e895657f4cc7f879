//! Training scenario endpoints: discovery, session lifecycle, event
//! polling, triage responses, and summaries.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{ApiError, ApiState};
use crate::catalog;
use crate::engine::summary::SessionSummary;

/// `GET /scenarios/complex/available` — catalog listing.
pub async fn available() -> Json<Value> {
    let scenarios = catalog::all();
    Json(json!({
        "scenarios": scenarios,
        "count": scenarios.len(),
    }))
}

/// `POST /scenarios/complex/{scenario_id}/start` — create a session.
///
/// The server mints the session id; the scenario id is recorded verbatim,
/// so unlisted scenarios still start.
pub async fn start(
    State(state): State<Arc<ApiState>>,
    Path(scenario_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let session_id = Uuid::new_v4().to_string();
    let receipt = state.engine.start_session(&session_id, &scenario_id)?;

    Ok(Json(json!({
        "session_id": session_id,
        "scenario_id": scenario_id,
        "scenario_name": catalog::display_name(&scenario_id),
        "total_events": receipt.sequence_length,
        "message": "Scenario started. Poll the events endpoint as the incident unfolds.",
    })))
}

/// `GET /scenarios/complex/{session_id}/events` — delivered events so far.
///
/// Unknown sessions return an empty list rather than 404: pollers may race
/// session creation or outlive removal.
pub async fn events(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    let events = state.engine.delivered_events(&session_id).await;
    let count = events.len();

    Json(json!({
        "session_id": session_id,
        "events": events,
        "count": count,
        "timestamp": Utc::now(),
    }))
}

/// Body of a triage response. Both ids are modeled as options so their
/// absence maps to a 400 instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub is_suspicious: bool,
}

/// `POST /scenarios/complex/{session_id}/respond` — grade one response.
pub async fn respond(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
    Json(body): Json<RespondRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(event_id), Some(action)) = (body.event_id, body.action) else {
        return Err(ApiError::BadRequest(
            "event_id and action are required".to_string(),
        ));
    };

    let evaluation = state
        .engine
        .submit_response(&session_id, &event_id, &action, body.is_suspicious)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "evaluation": evaluation.response,
        "feedback": evaluation.feedback,
    })))
}

/// `GET /scenarios/complex/{session_id}/summary` — live performance
/// summary.
pub async fn summary(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    Ok(Json(state.engine.summarize(&session_id).await?))
}

/// `DELETE /scenarios/complex/{session_id}` — remove a session.
pub async fn remove(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.engine.remove_session(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
