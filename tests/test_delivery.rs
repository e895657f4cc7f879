//! Delivery pipeline driven through the engine facade: pacing, audit
//! stream accounting, and shutdown behavior across sessions.

mod common;

use std::sync::Arc;

use common::{paced_options, step};
use siemulate::engine::{Engine, EngineOptions};
use siemulate::engine::event::{EventCategory, Severity};
use siemulate::observability::EventEmitter;
use tokio_util::sync::CancellationToken;

fn paced_engine(options: EngineOptions) -> (Arc<Engine>, Arc<EventEmitter>, CancellationToken) {
    let emitter = Arc::new(EventEmitter::noop());
    let cancel = CancellationToken::new();
    let engine = Arc::new(Engine::new(options, Arc::clone(&emitter), cancel.clone()));
    (engine, emitter, cancel)
}

// ----------------------------------------------------------------------------
// Audit trail over a complete lifecycle
// ----------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn full_lifecycle_emits_the_audit_trail() {
    let (engine, emitter, _cancel) = paced_engine(paced_options());

    let receipt = engine.start_session("s1", "advanced_phishing").expect("start");
    assert_eq!(receipt.sequence_length, 16);

    for _ in 0..16 {
        step().await;
    }

    let delivered = engine.delivered_events("s1").await;
    assert_eq!(delivered.len(), 16);
    assert!(
        delivered.iter().all(|e| e.timestamp.is_some()),
        "release stamps every event"
    );

    // One graded response, then an explicit removal.
    let event = &delivered[0];
    let (suspicious, action) = match (event.category, event.level) {
        (EventCategory::Attack, Severity::Critical) => (true, "isolate"),
        (EventCategory::Attack, _) => (true, "block_ip"),
        (EventCategory::Normal, _) => (false, "monitor"),
    };
    let evaluation = engine
        .submit_response("s1", &event.id, action, suspicious)
        .await
        .expect("respond");
    assert_eq!(evaluation.response.score, 50);

    engine.remove_session("s1").await.expect("remove");

    // SessionStarted + 16 EventDelivered + SequenceCompleted
    // + ResponseScored + SessionRemoved.
    assert_eq!(emitter.event_count(), 20);
}

// ----------------------------------------------------------------------------
// Cancellation freezes every session
// ----------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn cancellation_stops_all_sessions_mid_stream() {
    let (engine, _emitter, cancel) = paced_engine(paced_options());

    engine.start_session("a", "advanced_phishing").expect("start a");
    engine.start_session("b", "advanced_phishing").expect("start b");

    step().await;
    step().await;
    assert_eq!(engine.delivered_events("a").await.len(), 2);
    assert_eq!(engine.delivered_events("b").await.len(), 2);

    cancel.cancel();
    for _ in 0..5 {
        step().await;
    }

    // Delivery stops; the sessions themselves stay queryable.
    assert_eq!(engine.delivered_events("a").await.len(), 2);
    assert_eq!(engine.delivered_events("b").await.len(), 2);
    assert_eq!(engine.session_count(), 2);
}

// ----------------------------------------------------------------------------
// Removal mid-stream
// ----------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn removal_mid_stream_silences_the_feed() {
    let (engine, emitter, _cancel) = paced_engine(paced_options());

    engine.start_session("s1", "advanced_phishing").expect("start");
    for _ in 0..3 {
        step().await;
    }
    engine.remove_session("s1").await.expect("remove");
    let after_removal = emitter.event_count();

    for _ in 0..5 {
        step().await;
    }

    assert!(engine.delivered_events("s1").await.is_empty());
    assert_eq!(
        emitter.event_count(),
        after_removal,
        "no deliveries after removal"
    );
    // SessionStarted + 3 EventDelivered + SessionRemoved.
    assert_eq!(after_removal, 5);
}
