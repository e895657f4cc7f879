//! Security event model.
//!
//! [`SecurityEvent`] is the full internal record, including the ground-truth
//! suspicion flag the evaluator grades against. [`DeliveredEvent`] is the
//! learner-facing projection served over the API, which omits that flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Severity
// ============================================================================

/// Log severity as shown in the trainee's event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Routine operational noise.
    Info,
    /// Needs attention but not confirmed hostile.
    Warning,
    /// Confirmed or high-confidence hostile activity.
    Critical,
}

impl Severity {
    /// Wire representation, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Category
// ============================================================================

/// Whether an event belongs to the benign background or the staged attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Benign operational event.
    Normal,
    /// Staged attack indicator.
    Attack,
}

impl EventCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Attack => "attack",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Events
// ============================================================================

/// Full event record as held inside a session.
///
/// `suspicious` is the ground truth the evaluator reads. It is derived from
/// the category at construction and never exposed to the trainee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Pool template id (`norm_*`/`susp_*`) until sequenced, then `evt_NNN`.
    pub id: String,
    /// Benign background or staged attack.
    pub category: EventCategory,
    /// Severity shown in the feed.
    pub level: Severity,
    /// Log line text.
    pub message: String,
    /// Producing system.
    pub source: String,
    /// Ground-truth suspicion flag.
    pub suspicious: bool,
    /// Stamped at delivery; `None` while the event waits in the sequence.
    pub timestamp: Option<DateTime<Utc>>,
}

impl SecurityEvent {
    /// Build a pool template. The ground-truth flag follows the category.
    #[must_use]
    pub fn template(
        id: &str,
        category: EventCategory,
        level: Severity,
        message: &str,
        source: &str,
    ) -> Self {
        Self {
            id: id.to_owned(),
            category,
            level,
            message: message.to_owned(),
            source: source.to_owned(),
            suspicious: category == EventCategory::Attack,
            timestamp: None,
        }
    }

    /// Learner-facing projection, without the ground-truth flag.
    #[must_use]
    pub fn to_delivered(&self) -> DeliveredEvent {
        DeliveredEvent {
            id: self.id.clone(),
            timestamp: self.timestamp,
            level: self.level,
            message: self.message.clone(),
            source: self.source.clone(),
            category: self.category,
        }
    }
}

/// One row of the trainee's event feed.
///
/// Serialized as-is by the events endpoint. Deliberately omits the
/// ground-truth suspicion flag; triage calls must come from reading the
/// message, source, and severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveredEvent {
    /// Sequence id (`evt_001`..).
    pub id: String,
    /// Delivery wall-clock time.
    pub timestamp: Option<DateTime<Utc>>,
    /// Severity.
    pub level: Severity,
    /// Log line text.
    pub message: String,
    /// Producing system.
    pub source: String,
    /// Benign background or staged attack.
    pub category: EventCategory,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"CRITICAL\""
        );
        let parsed: Severity = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(parsed, Severity::Warning);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventCategory::Attack).unwrap(),
            "\"attack\""
        );
        let parsed: EventCategory = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(parsed, EventCategory::Normal);
    }

    #[test]
    fn test_template_derives_ground_truth_from_category() {
        let benign = SecurityEvent::template(
            "norm_001",
            EventCategory::Normal,
            Severity::Info,
            "msg",
            "src",
        );
        assert!(!benign.suspicious);
        assert!(benign.timestamp.is_none());

        let attack = SecurityEvent::template(
            "susp_001",
            EventCategory::Attack,
            Severity::Critical,
            "msg",
            "src",
        );
        assert!(attack.suspicious);
    }

    #[test]
    fn test_delivered_projection_omits_ground_truth() {
        let mut event = SecurityEvent::template(
            "evt_001",
            EventCategory::Attack,
            Severity::Critical,
            "Lateral movement detected",
            "Network Monitor",
        );
        event.timestamp = Some(Utc::now());

        let json = serde_json::to_value(event.to_delivered()).unwrap();
        assert!(json.get("suspicious").is_none());
        assert!(json.get("is_suspicious").is_none());
        assert_eq!(json["id"], "evt_001");
        assert_eq!(json["category"], "attack");
        assert_eq!(json["level"], "CRITICAL");
    }
}
