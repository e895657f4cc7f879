//! Delivery scheduler: one background task per session.
//!
//! Each task simulates SIEM feed lag by sleeping a uniform random delay
//! between events, then releasing exactly one event per wake in sequence
//! order. Waking up is the cancellation point: the task re-looks up its
//! session in the store and exits silently when the session has been
//! removed or reaped. A fully delivered sequence ends the task naturally
//! and leaves the session in the store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use rand::rngs::StdRng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::engine::store::SessionStore;
use crate::observability::events::{Event, EventEmitter};
use crate::observability::metrics;

/// Spawns and drives the per-session delivery loops.
#[derive(Debug, Clone)]
pub struct DeliveryScheduler {
    store: Arc<SessionStore>,
    emitter: Arc<EventEmitter>,
    min_delay: Duration,
    max_delay: Duration,
    cancel: CancellationToken,
}

impl DeliveryScheduler {
    /// `min_delay..=max_delay` bounds the uniform inter-event delay.
    #[must_use]
    pub const fn new(
        store: Arc<SessionStore>,
        emitter: Arc<EventEmitter>,
        min_delay: Duration,
        max_delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            emitter,
            min_delay,
            max_delay,
            cancel,
        }
    }

    /// Spawn the delivery task for one session.
    ///
    /// The task owns its delay RNG so seeded runs reproduce the full
    /// delivery timeline.
    pub fn spawn(&self, session_id: String, rng: StdRng) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            scheduler.run(session_id, rng).await;
        })
    }

    async fn run(&self, session_id: String, mut rng: StdRng) {
        loop {
            // Anything left to deliver? The handle is scoped so it is
            // never held across the sleep below.
            {
                let Some(handle) = self.store.get(&session_id) else {
                    debug!(session_id, "session gone, delivery task exiting");
                    return;
                };
                let session = handle.lock().await;
                if !session.status.is_active() {
                    debug!(session_id, "session terminated, delivery task exiting");
                    return;
                }
                if session.is_exhausted() {
                    let delivered = session.delivered.len();
                    drop(session);
                    debug!(session_id, delivered, "sequence fully delivered");
                    self.emitter.emit(Event::SequenceCompleted {
                        timestamp: Utc::now(),
                        session_id,
                        delivered,
                    });
                    return;
                }
            }

            let delay = self.sample_delay(&mut rng);
            metrics::record_delivery_delay(delay);
            tokio::select! {
                () = self.cancel.cancelled() => {
                    debug!(session_id, "shutdown during delay, delivery task exiting");
                    return;
                }
                () = tokio::time::sleep(delay) => {}
            }

            // Waking is the cancellation point: re-check that the session
            // still exists before touching it.
            let Some(handle) = self.store.get(&session_id) else {
                debug!(session_id, "session removed during delay, delivery task exiting");
                return;
            };
            let mut session = handle.lock().await;
            if !session.status.is_active() {
                debug!(session_id, "session terminated during delay, delivery task exiting");
                return;
            }

            let now = Utc::now();
            let released = session
                .deliver_next(now)
                .map(|event| (event.id.clone(), event.level));
            let position = session.next_index;
            drop(session);

            if let Some((event_id, level)) = released {
                debug!(session_id, event_id, position, "delivered event");
                metrics::record_event_delivered(level);
                self.emitter.emit(Event::EventDelivered {
                    timestamp: now,
                    session_id: session_id.clone(),
                    event_id,
                    position,
                    level,
                });
            }
        }
    }

    fn sample_delay(&self, rng: &mut StdRng) -> Duration {
        let secs = rng.random_range(self.min_delay.as_secs_f64()..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

// ============================================================================
// Tests
// ============================================================================
