//! Scenario engine: pools, sequence generation, session lifecycle,
//! gradual delivery, response evaluation, and summaries.
//!
//! [`Engine`] is the facade the HTTP layer talks to. It owns the session
//! store, spawns one delivery task per session, and funnels every state
//! change through the store's per-session locks.

pub mod evaluator;
pub mod event;
pub mod pool;
pub mod rng;
pub mod scheduler;
pub mod sequence;
pub mod session;
pub mod store;
pub mod summary;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::engine::evaluator::Evaluation;
use crate::engine::event::{DeliveredEvent, SecurityEvent};
use crate::engine::pool::EventPool;
use crate::engine::rng::EngineRng;
use crate::engine::scheduler::DeliveryScheduler;
use crate::engine::session::Session;
use crate::engine::store::SessionStore;
use crate::engine::summary::SessionSummary;
use crate::error::EngineError;
use crate::observability::events::{Event, EventEmitter};
use crate::observability::metrics;

// ============================================================================
// Options
// ============================================================================

/// Tunables for one engine instance, typically derived from the config
/// file. Defaults match the built-in scenario contract.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Events per generated sequence.
    pub sequence_length: usize,
    /// Probability the generator prefers the benign pool per slot.
    pub benign_bias: f64,
    /// Lower bound of the inter-event delivery delay.
    pub min_delay: Duration,
    /// Upper bound of the inter-event delivery delay.
    pub max_delay: Duration,
    /// Idle time after which the reaper collects a session.
    pub session_ttl: Duration,
    /// How often the reaper scans the store.
    pub reap_interval: Duration,
    /// Fixed seed for reproducible runs; `None` for OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            sequence_length: 16,
            benign_bias: 0.6,
            min_delay: Duration::from_secs(3),
            max_delay: Duration::from_secs(7),
            session_ttl: Duration::from_secs(30 * 60),
            reap_interval: Duration::from_secs(60),
            seed: None,
        }
    }
}

/// Returned by [`Engine::start_session`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StartReceipt {
    /// Number of events the session will deliver.
    pub sequence_length: usize,
}

// ============================================================================
// Engine
// ============================================================================

/// Scenario delivery and evaluation engine.
#[derive(Debug)]
pub struct Engine {
    pool: EventPool,
    store: Arc<SessionStore>,
    scheduler: DeliveryScheduler,
    emitter: Arc<EventEmitter>,
    rng: EngineRng,
    options: EngineOptions,
    cancel: CancellationToken,
}

impl Engine {
    /// Build an engine around the built-in event pool.
    #[must_use]
    pub fn new(
        options: EngineOptions,
        emitter: Arc<EventEmitter>,
        cancel: CancellationToken,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        let scheduler = DeliveryScheduler::new(
            Arc::clone(&store),
            Arc::clone(&emitter),
            options.min_delay,
            options.max_delay,
            cancel.clone(),
        );
        let rng = EngineRng::new(options.seed);

        Self {
            pool: EventPool::builtin().clone(),
            store,
            scheduler,
            emitter,
            rng,
            options,
            cancel,
        }
    }

    /// Direct store access, used by the health endpoint and tests.
    #[must_use]
    pub const fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Number of live sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Create a session, generate its sequence, and spawn its delivery
    /// task. The `scenario_id` is recorded verbatim and never validated.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionExists`] when the key is already taken.
    pub fn start_session(
        &self,
        session_id: &str,
        scenario_id: &str,
    ) -> Result<StartReceipt, EngineError> {
        let mut sequence_rng = self.rng.stream();
        let sequence = sequence::generate(
            &self.pool,
            self.options.sequence_length,
            self.options.benign_bias,
            &mut sequence_rng,
        );
        let sequence_length = sequence.len();

        self.store
            .create(Session::new(session_id, scenario_id, sequence))?;

        // Detached: the task ends on its own via completion, removal, or
        // shutdown cancellation.
        let delay_rng = self.rng.stream();
        let _task = self.scheduler.spawn(session_id.to_owned(), delay_rng);

        info!(session_id, scenario_id, sequence_length, "session started");
        metrics::record_session_started();
        metrics::set_sessions_active(self.store.len() as u64);
        self.emitter.emit(Event::SessionStarted {
            timestamp: Utc::now(),
            session_id: session_id.to_owned(),
            scenario_id: scenario_id.to_owned(),
            sequence_length,
        });

        Ok(StartReceipt { sequence_length })
    }

    /// Learner projection of the delivered prefix. An unknown session
    /// yields an empty list, not an error: pollers may race creation.
    pub async fn delivered_events(&self, session_id: &str) -> Vec<DeliveredEvent> {
        let Some(handle) = self.store.get(session_id) else {
            return Vec::new();
        };
        let session = handle.lock().await;
        session
            .delivered
            .iter()
            .map(SecurityEvent::to_delivered)
            .collect()
    }

    /// Grade and record a triage response.
    ///
    /// The event id is searched among DELIVERED events only; responding to
    /// an event that exists in the sequence but has not been released yet
    /// is rejected. Re-submissions append a duplicate-flagged record.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionNotFound`] or [`EngineError::EventNotFound`].
    pub async fn submit_response(
        &self,
        session_id: &str,
        event_id: &str,
        action: &str,
        marked_suspicious: bool,
    ) -> Result<Evaluation, EngineError> {
        let Some(handle) = self.store.get(session_id) else {
            return Err(EngineError::SessionNotFound(session_id.to_owned()));
        };
        let mut session = handle.lock().await;

        let Some(event) = session.find_delivered(event_id) else {
            return Err(EngineError::EventNotFound(event_id.to_owned()));
        };
        let event = event.clone();
        let duplicate = session.has_response_for(event_id);

        let response = evaluator::evaluate(&event, action, marked_suspicious, duplicate);
        let feedback = evaluator::feedback_for(&event, &response);
        session.push_response(response.clone());
        drop(session);

        debug!(
            session_id,
            event_id,
            score = response.score,
            duplicate,
            "response recorded"
        );
        metrics::record_response(action, response.score, duplicate);
        self.emitter.emit(Event::ResponseScored {
            timestamp: response.timestamp,
            session_id: session_id.to_owned(),
            event_id: event_id.to_owned(),
            score: response.score,
            correct_suspicion: response.correct_suspicion,
            correct_action: response.correct_action,
            duplicate,
        });

        Ok(Evaluation { response, feedback })
    }

    /// Live performance summary, recomputed on every call.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionNotFound`] when no session exists under the id.
    pub async fn summarize(&self, session_id: &str) -> Result<SessionSummary, EngineError> {
        let Some(handle) = self.store.get(session_id) else {
            return Err(EngineError::SessionNotFound(session_id.to_owned()));
        };
        let session = handle.lock().await;
        let name = crate::catalog::display_name(&session.scenario_id);
        Ok(summary::summarize(&session, &name))
    }

    /// Remove a session on request. Its delivery task observes the removal
    /// on its next wake and exits.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionNotFound`] when no session exists under the id.
    pub async fn remove_session(&self, session_id: &str) -> Result<(), EngineError> {
        self.store.remove(session_id).await?;

        info!(session_id, "session removed");
        metrics::record_session_closed(false);
        metrics::set_sessions_active(self.store.len() as u64);
        self.emitter.emit(Event::SessionRemoved {
            timestamp: Utc::now(),
            session_id: session_id.to_owned(),
        });
        Ok(())
    }

    /// Start the TTL reaper. It scans the store every `reap_interval` and
    /// collects sessions idle longer than `session_ttl`, bounding both
    /// session memory and delivery tasks.
    ///
    /// The task stops when the cancellation token fires.
    pub fn start_reaper(self: &Arc<Self>) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(engine.options.reap_interval);
            loop {
                tokio::select! {
                    () = engine.cancel.cancelled() => {
                        debug!("session reaper cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let reaped = engine.store.reap_idle(engine.options.session_ttl).await;
                        if reaped.is_empty() {
                            continue;
                        }
                        metrics::set_sessions_active(engine.store.len() as u64);
                        for session_id in reaped {
                            info!(session_id, "idle session reaped");
                            metrics::record_session_closed(true);
                            engine.emitter.emit(Event::SessionExpired {
                                timestamp: Utc::now(),
                                session_id,
                            });
                        }
                    }
                }
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_engine(options: EngineOptions) -> Engine {
        Engine::new(
            options,
            Arc::new(EventEmitter::noop()),
            CancellationToken::new(),
        )
    }

    fn seeded_options() -> EngineOptions {
        EngineOptions {
            seed: Some(42),
            ..EngineOptions::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_session_generates_full_sequence() {
        let engine = test_engine(seeded_options());
        let receipt = engine.start_session("s1", "advanced_phishing").unwrap();

        assert_eq!(receipt.sequence_length, 16);
        assert_eq!(engine.session_count(), 1);

        let session = engine.store().get("s1").unwrap();
        let session = session.lock().await;
        assert_eq!(session.sequence.len(), 16);
        assert_eq!(session.sequence[0].id, "evt_001");
        assert_eq!(session.sequence[15].id, "evt_016");
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_session_id_rejected() {
        let engine = test_engine(seeded_options());
        engine.start_session("s1", "advanced_phishing").unwrap();

        let err = engine.start_session("s1", "advanced_phishing").unwrap_err();
        assert_eq!(err, EngineError::SessionExists("s1".into()));
        assert_eq!(engine.session_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_id_is_inert() {
        let engine = test_engine(seeded_options());
        // Unknown scenario ids are recorded verbatim, never rejected.
        let receipt = engine.start_session("s1", "no_such_scenario").unwrap();
        assert_eq!(receipt.sequence_length, 16);
    }

    #[tokio::test]
    async fn test_delivered_events_unknown_session_is_empty() {
        let engine = test_engine(seeded_options());
        assert!(engine.delivered_events("ghost").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_before_delivery_is_event_not_found() {
        let engine = test_engine(seeded_options());
        engine.start_session("s1", "advanced_phishing").unwrap();

        // evt_001 exists in the sequence but nothing has been delivered.
        let err = engine
            .submit_response("s1", "evt_001", "monitor", false)
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::EventNotFound("evt_001".into()));
    }

    #[tokio::test]
    async fn test_respond_unknown_session() {
        let engine = test_engine(seeded_options());
        let err = engine
            .submit_response("ghost", "evt_001", "monitor", false)
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::SessionNotFound("ghost".into()));
    }

    #[tokio::test]
    async fn test_summarize_unknown_session() {
        let engine = test_engine(seeded_options());
        assert_eq!(
            engine.summarize("ghost").await.unwrap_err(),
            EngineError::SessionNotFound("ghost".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_engines_generate_identical_sequences() {
        let a = test_engine(seeded_options());
        let b = test_engine(seeded_options());
        a.start_session("s1", "x").unwrap();
        b.start_session("s1", "x").unwrap();

        async fn ids(engine: &Engine) -> Vec<String> {
            let handle = engine.store().get("s1").unwrap();
            let session = handle.lock().await;
            session
                .sequence
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
        }
        assert_eq!(ids(&a).await, ids(&b).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_collects_idle_sessions() {
        let options = EngineOptions {
            // Empty sequences keep the delivery task from refreshing the
            // idle clock mid-test.
            sequence_length: 0,
            session_ttl: Duration::from_secs(60),
            reap_interval: Duration::from_secs(10),
            seed: Some(1),
            ..EngineOptions::default()
        };
        let cancel = CancellationToken::new();
        let engine = Arc::new(Engine::new(
            options,
            Arc::new(EventEmitter::noop()),
            cancel.clone(),
        ));
        let reaper = engine.start_reaper();

        engine.start_session("s1", "x").unwrap();
        assert_eq!(engine.session_count(), 1);

        tokio::time::advance(Duration::from_secs(90)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(engine.session_count(), 0);
        cancel.cancel();
        reaper.await.unwrap();
    }
}
