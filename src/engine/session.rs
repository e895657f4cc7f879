//! Per-trainee session state.
//!
//! A [`Session`] owns the generated sequence, the delivered prefix, and the
//! graded responses. All mutation happens under the store's per-session
//! lock; the helpers here keep the prefix/cursor invariants in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::engine::event::SecurityEvent;

// ============================================================================
// Status
// ============================================================================

/// Lifecycle state. "Active" means "present in the store": a session whose
/// sequence has fully delivered stays active until removed or reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// In the store; delivery may be running or already complete.
    Active,
    /// Removed or reaped; no further mutation permitted.
    Terminated,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

// ============================================================================
// Graded Response
// ============================================================================

/// One graded triage submission, appended per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Delivered event the trainee responded to.
    pub event_id: String,
    /// Action the trainee chose (free-form string).
    pub action: String,
    /// Whether the trainee flagged the event as suspicious.
    pub marked_suspicious: bool,
    /// Submission time.
    pub timestamp: DateTime<Utc>,
    /// Suspicion call matched ground truth.
    pub correct_suspicion: bool,
    /// Action matched the response policy for the event.
    pub correct_action: bool,
    /// 25 points per correct dimension.
    pub score: u32,
    /// A response for this event id was already on record.
    pub duplicate: bool,
}

// ============================================================================
// Session
// ============================================================================

/// All state for one scenario run.
///
/// Invariants, maintained by the methods below:
/// - `delivered` is a prefix of `sequence` (ids, order, and stamped
///   timestamps agree);
/// - `next_index == delivered.len()`.
#[derive(Debug)]
pub struct Session {
    /// Caller-supplied opaque key.
    pub session_id: String,
    /// Recorded verbatim; never interpreted by the engine.
    pub scenario_id: String,
    /// Full generated sequence. Immutable except for delivery timestamps.
    pub sequence: Vec<SecurityEvent>,
    /// Released prefix, in delivery order.
    pub delivered: Vec<SecurityEvent>,
    /// Delivery cursor.
    pub next_index: usize,
    /// Graded responses, append-only, duplicates preserved.
    pub responses: Vec<Response>,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Wall-clock time of the most recent delivery.
    pub last_event_time: Option<DateTime<Utc>>,
    /// Monotonic instant of last activity, read by the TTL reaper.
    pub touched_at: Instant,
}

impl Session {
    /// Create a fresh session around a generated sequence.
    #[must_use]
    pub fn new(session_id: &str, scenario_id: &str, sequence: Vec<SecurityEvent>) -> Self {
        Self {
            session_id: session_id.to_owned(),
            scenario_id: scenario_id.to_owned(),
            sequence,
            delivered: Vec::new(),
            next_index: 0,
            responses: Vec::new(),
            status: SessionStatus::Active,
            created_at: Utc::now(),
            last_event_time: None,
            touched_at: Instant::now(),
        }
    }

    /// True once every sequenced event has been delivered.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.sequence.len()
    }

    /// Release the next event: stamp its delivery time, append it to the
    /// delivered prefix, and advance the cursor. Returns the released event,
    /// or `None` when the sequence is exhausted.
    pub fn deliver_next(&mut self, now: DateTime<Utc>) -> Option<&SecurityEvent> {
        let event = self.sequence.get_mut(self.next_index)?;
        event.timestamp = Some(now);
        let released = event.clone();
        self.delivered.push(released);
        self.next_index += 1;
        self.last_event_time = Some(now);
        self.touched_at = Instant::now();
        self.delivered.last()
    }

    /// Look up an event among the DELIVERED prefix only. Events still
    /// waiting in the sequence are invisible to trainees.
    #[must_use]
    pub fn find_delivered(&self, event_id: &str) -> Option<&SecurityEvent> {
        self.delivered.iter().find(|e| e.id == event_id)
    }

    /// True when a response for this event id is already on record.
    #[must_use]
    pub fn has_response_for(&self, event_id: &str) -> bool {
        self.responses.iter().any(|r| r.event_id == event_id)
    }

    /// Append a graded response and bump the activity clock.
    pub fn push_response(&mut self, response: Response) {
        self.responses.push(response);
        self.touched_at = Instant::now();
    }

    /// Duration since the last delivery or response.
    #[must_use]
    pub fn idle_for(&self) -> std::time::Duration {
        self.touched_at.elapsed()
    }

    /// Flip to terminated. Called by the store on removal and reaping.
    pub const fn terminate(&mut self) {
        self.status = SessionStatus::Terminated;
    }
}

// ============================================================================
// Tests
// ============================================================================
