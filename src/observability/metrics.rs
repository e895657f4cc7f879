//! Metrics collection.
//!
//! Prometheus-compatible metrics with label cardinality protection and
//! typed convenience functions for recording measurements. Free-form
//! trainee input (the chosen action string) is sanitized against the known
//! action set before use as a label; every other label value is
//! engine-controlled and bounded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::engine::event::Severity;
use crate::error::SiemulateError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Actions the response policy recognizes, used for label cardinality
/// protection. Anything else a trainee types is bucketed as `"__other__"`
/// so request payloads cannot mint unbounded label values.
const KNOWN_ACTIONS: [&str; 5] = ["monitor", "isolate", "block_ip", "escalate", "shutdown"];

/// Sanitizes a trainee-supplied action for use as a metrics label.
#[must_use]
pub fn sanitize_action_label(action: &str) -> &str {
    if KNOWN_ACTIONS.contains(&action) {
        action
    } else {
        "__other__"
    }
}

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`.  When `None`, the recorder is installed without
/// an HTTP endpoint (metrics are recorded internally and can be read
/// programmatically).
///
/// # Errors
///
/// Returns `SiemulateError::Io` if the recorder or HTTP listener cannot
/// be installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), SiemulateError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| SiemulateError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!(
        "siemulate_sessions_started_total",
        "Total number of scenario sessions started"
    );
    describe_counter!(
        "siemulate_sessions_closed_total",
        "Total number of sessions removed, by reason"
    );
    describe_gauge!(
        "siemulate_sessions_active",
        "Number of sessions currently in the store"
    );
    describe_counter!(
        "siemulate_events_delivered_total",
        "Total number of events released into session feeds, by severity"
    );
    describe_histogram!(
        "siemulate_delivery_delay_seconds",
        "Sampled inter-event delivery delay in seconds"
    );
    describe_counter!(
        "siemulate_responses_total",
        "Total number of graded triage responses, by action and score"
    );
    describe_histogram!(
        "siemulate_response_score",
        "Score awarded per graded response (0, 25, or 50)"
    );
    describe_counter!(
        "siemulate_quiz_submissions_total",
        "Total number of graded quiz submissions"
    );
    describe_histogram!(
        "siemulate_quiz_score_percent",
        "Quiz score percentage per submission"
    );
    describe_gauge!("siemulate_uptime_seconds", "Server uptime in seconds");
}

/// Records a session start.
pub fn record_session_started() {
    counter!("siemulate_sessions_started_total").increment(1);
}

/// Records a session removal, by explicit request or TTL expiry.
pub fn record_session_closed(expired: bool) {
    let reason = if expired { "expired" } else { "request" };
    counter!("siemulate_sessions_closed_total", "reason" => reason).increment(1);
}

/// Sets the live session gauge.
#[allow(clippy::cast_precision_loss)]
pub fn set_sessions_active(count: u64) {
    gauge!("siemulate_sessions_active").set(count as f64);
}

/// Records one delivered event.
pub fn record_event_delivered(level: Severity) {
    counter!("siemulate_events_delivered_total", "level" => level.as_str()).increment(1);
}

/// Records the delay sampled before a delivery.
pub fn record_delivery_delay(delay: Duration) {
    histogram!("siemulate_delivery_delay_seconds").record(delay.as_secs_f64());
}

/// Records a graded triage response.
pub fn record_response(action: &str, score: u32, duplicate: bool) {
    let label = sanitize_action_label(action);
    let duplicate = if duplicate { "true" } else { "false" };
    counter!(
        "siemulate_responses_total",
        "action" => label.to_owned(),
        "score" => score.to_string(),
        "duplicate" => duplicate,
    )
    .increment(1);
    histogram!("siemulate_response_score").record(f64::from(score));
}

/// Records a graded quiz submission.
pub fn record_quiz_submission(score_percent: f64) {
    counter!("siemulate_quiz_submissions_total").increment(1);
    histogram!("siemulate_quiz_score_percent").record(score_percent);
}

/// Sets the server uptime gauge.
pub fn set_uptime(duration: Duration) {
    gauge!("siemulate_uptime_seconds").set(duration.as_secs_f64());
}
