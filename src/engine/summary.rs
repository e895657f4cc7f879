//! Session performance summary.
//!
//! Recomputed live from session state on every call; nothing is cached.
//! Accuracy denominators count every recorded response, duplicates
//! included, so re-submissions dilute rather than overwrite.

use serde::{Deserialize, Serialize};

use crate::engine::evaluator::POINTS_PER_DIMENSION;
use crate::engine::session::Session;

/// Maximum score a single response can earn.
const MAX_SCORE_PER_RESPONSE: u32 = 2 * POINTS_PER_DIMENSION;

/// Snapshot of trainee performance for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session key.
    pub session_id: String,
    /// Display name of the scenario.
    pub scenario_name: String,
    /// Full sequence length.
    pub total_events: usize,
    /// Attack events among those DELIVERED so far.
    pub total_suspicious_events: usize,
    /// Recorded responses (duplicates each count).
    pub events_responded_to: usize,
    /// Responses with a correct suspicion call.
    pub correct_suspicions: usize,
    /// Responses with an acceptable action.
    pub correct_actions: usize,
    /// Sum of awarded scores.
    pub total_score: u32,
    /// `events_responded_to * 50`.
    pub max_possible_score: u32,
    /// Percentage of correct suspicion calls; 0 with no responses.
    pub suspicion_accuracy: f64,
    /// Percentage of acceptable actions; 0 with no responses.
    pub action_accuracy: f64,
}

/// Compute the summary for a session.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(session: &Session, scenario_name: &str) -> SessionSummary {
    let responded = session.responses.len();
    let correct_suspicions = session
        .responses
        .iter()
        .filter(|r| r.correct_suspicion)
        .count();
    let correct_actions = session
        .responses
        .iter()
        .filter(|r| r.correct_action)
        .count();
    let total_score: u32 = session.responses.iter().map(|r| r.score).sum();

    let accuracy = |correct: usize| {
        if responded == 0 {
            0.0
        } else {
            correct as f64 / responded as f64 * 100.0
        }
    };

    SessionSummary {
        session_id: session.session_id.clone(),
        scenario_name: scenario_name.to_owned(),
        total_events: session.sequence.len(),
        total_suspicious_events: session.delivered.iter().filter(|e| e.suspicious).count(),
        events_responded_to: responded,
        correct_suspicions,
        correct_actions,
        total_score,
        max_possible_score: responded as u32 * MAX_SCORE_PER_RESPONSE,
        suspicion_accuracy: accuracy(correct_suspicions),
        action_accuracy: accuracy(correct_actions),
    }
}

// ============================================================================
// Tests
// ============================================================================
