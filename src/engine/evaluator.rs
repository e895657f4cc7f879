//! Response evaluation: grading and trainee feedback.
//!
//! Two graded dimensions, 25 points each: did the trainee flag the event
//! correctly, and did they pick an acceptable action for it. The action
//! policy branches on the ground-truth flag first and severity second, so
//! a mislabeled severity can never flip an event between benign and
//! attack handling.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::event::{SecurityEvent, Severity};
use crate::engine::session::Response;

/// Points awarded per correct dimension (suspicion call, action choice).
pub const POINTS_PER_DIMENSION: u32 = 25;

/// Acceptable actions for a critical attack event.
const CRITICAL_ACTIONS: [&str; 3] = ["isolate", "escalate", "shutdown"];

/// Acceptable actions for a non-critical attack event.
const WARNING_ACTIONS: [&str; 3] = ["monitor", "isolate", "block_ip"];

// ============================================================================
// Grading
// ============================================================================

/// Whether `action` is acceptable for `event` under the response policy.
///
/// Attack events demand containment proportional to severity; benign
/// events only ever need monitoring.
#[must_use]
pub fn action_is_correct(event: &SecurityEvent, action: &str) -> bool {
    if event.suspicious {
        match event.level {
            Severity::Critical => CRITICAL_ACTIONS.contains(&action),
            Severity::Warning | Severity::Info => WARNING_ACTIONS.contains(&action),
        }
    } else {
        action == "monitor"
    }
}

/// Grade one triage submission against a delivered event.
#[must_use]
pub fn evaluate(
    event: &SecurityEvent,
    action: &str,
    marked_suspicious: bool,
    duplicate: bool,
) -> Response {
    let correct_suspicion = marked_suspicious == event.suspicious;
    let correct_action = action_is_correct(event, action);
    let score = POINTS_PER_DIMENSION * u32::from(correct_suspicion)
        + POINTS_PER_DIMENSION * u32::from(correct_action);

    Response {
        event_id: event.id.clone(),
        action: action.to_owned(),
        marked_suspicious,
        timestamp: Utc::now(),
        correct_suspicion,
        correct_action,
        score,
        duplicate,
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// Human feedback attached to a graded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Verdict on the suspicion call.
    pub suspicion_feedback: String,
    /// Verdict on the chosen action.
    pub action_feedback: String,
    /// Improvement hints; empty on a perfect response.
    pub recommendations: Vec<String>,
}

/// A graded response together with its feedback, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// The graded, recorded response.
    pub response: Response,
    /// Feedback for the trainee.
    pub feedback: Feedback,
}

/// Build feedback from the four correctness cells.
#[must_use]
pub fn feedback_for(event: &SecurityEvent, response: &Response) -> Feedback {
    let mut recommendations = Vec::new();

    let suspicion_feedback = if response.correct_suspicion {
        if event.suspicious {
            "Correct! This event is suspicious and deserves attention.".to_owned()
        } else {
            "Correct! This is a routine operational event.".to_owned()
        }
    } else if event.suspicious {
        recommendations.push(
            "Watch for wording like 'suspicious', 'unusual', or 'multiple failed attempts' \
             when scanning the feed."
                .to_owned(),
        );
        "This event is actually suspicious and should have been flagged.".to_owned()
    } else {
        recommendations.push(
            "Scheduled backups, routine updates, and ordinary logins are part of normal \
             operations and are not suspicious."
                .to_owned(),
        );
        "This is a routine event; flagging it is a false positive.".to_owned()
    };

    let action_feedback = if response.correct_action {
        "Good choice of action for this event.".to_owned()
    } else if event.suspicious {
        match event.level {
            Severity::Critical => {
                recommendations.push(
                    "Critical attack indicators call for containment: isolate, escalate, \
                     or shutdown."
                        .to_owned(),
                );
                "A critical event needs a stronger response than the one chosen.".to_owned()
            }
            Severity::Warning | Severity::Info => {
                recommendations.push(
                    "Warning-level indicators are handled with monitor, isolate, or block_ip."
                        .to_owned(),
                );
                "This warning-level event calls for a measured response.".to_owned()
            }
        }
    } else {
        recommendations.push("Routine events only need monitoring.".to_owned());
        "No intervention is needed for a routine event.".to_owned()
    };

    Feedback {
        suspicion_feedback,
        action_feedback,
        recommendations,
    }
}

// ============================================================================
// Tests
// ============================================================================
