//! Session store: sole owner of session state and its synchronization.
//!
//! Sessions live in a concurrent map keyed by session id, each behind its
//! own async mutex so delivery, responses, and summaries serialize per
//! session without a global lock. Callers get an [`SessionHandle`] and never
//! touch the map's internals; removal semantics (terminate, then detach)
//! live here and nowhere else.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Mutex;

use crate::engine::session::Session;
use crate::error::EngineError;

/// Shared, lockable reference to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Concurrent session map.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session under its own id.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionExists`] when the key is already taken; an
    /// existing session is never silently overwritten.
    pub fn create(&self, session: Session) -> Result<SessionHandle, EngineError> {
        match self.sessions.entry(session.session_id.clone()) {
            Entry::Occupied(_) => Err(EngineError::SessionExists(session.session_id)),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(session));
                slot.insert(Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    /// Live handle for a session, or `None` if absent.
    #[must_use]
    pub fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// True when a session exists under this id.
    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Mark a session terminated and detach it from the map.
    ///
    /// A delivery task that already woke and fetched the handle sees the
    /// terminated status under the lock; one that wakes later misses the
    /// key. Either way no further events are appended.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionNotFound`] when no session exists under the id.
    pub async fn remove(&self, session_id: &str) -> Result<(), EngineError> {
        let Some(handle) = self.get(session_id) else {
            return Err(EngineError::SessionNotFound(session_id.to_owned()));
        };
        handle.lock().await.terminate();
        self.sessions.remove(session_id);
        Ok(())
    }

    /// Remove every session idle (no delivery, no response) for at least
    /// `ttl`. Returns the reaped session ids.
    pub async fn reap_idle(&self, ttl: Duration) -> Vec<String> {
        // Snapshot the keys first: holding a map ref across an await
        // point would block writers.
        let keys: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();

        let mut reaped = Vec::new();
        for key in keys {
            let Some(handle) = self.get(&key) else {
                continue;
            };
            let mut session = handle.lock().await;
            if session.idle_for() >= ttl {
                session.terminate();
                drop(session);
                if self.sessions.remove(&key).is_some() {
                    reaped.push(key);
                }
            }
        }
        reaped
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::SessionStatus;

    fn session(id: &str) -> Session {
        Session::new(id, "advanced_phishing", Vec::new())
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = SessionStore::new();
        store.create(session("s1")).unwrap();

        assert!(store.contains("s1"));
        assert_eq!(store.len(), 1);
        let handle = store.get("s1").unwrap();
        assert_eq!(handle.lock().await.session_id, "s1");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_key() {
        let store = SessionStore::new();
        store.create(session("s1")).unwrap();

        let err = store.create(session("s1")).unwrap_err();
        assert_eq!(err, EngineError::SessionExists("s1".into()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_terminates_and_detaches() {
        let store = SessionStore::new();
        store.create(session("s1")).unwrap();

        // Simulate a delivery task that fetched the handle before removal.
        let held = store.get("s1").unwrap();

        store.remove("s1").await.unwrap();
        assert!(!store.contains("s1"));
        assert_eq!(held.lock().await.status, SessionStatus::Terminated);
    }

    #[tokio::test]
    async fn test_remove_unknown_session() {
        let store = SessionStore::new();
        let err = store.remove("nope").await.unwrap_err();
        assert_eq!(err, EngineError::SessionNotFound("nope".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_removes_only_idle_sessions() {
        let store = SessionStore::new();
        store.create(session("old")).unwrap();

        tokio::time::advance(Duration::from_secs(300)).await;
        store.create(session("fresh")).unwrap();

        let reaped = store.reap_idle(Duration::from_secs(120)).await;
        assert_eq!(reaped, vec!["old".to_owned()]);
        assert!(!store.contains("old"));
        assert!(store.contains("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_resets_on_activity() {
        let store = SessionStore::new();
        store.create(session("busy")).unwrap();

        tokio::time::advance(Duration::from_secs(100)).await;
        // A graded response counts as activity and defers reaping.
        store
            .get("busy")
            .unwrap()
            .lock()
            .await
            .push_response(crate::engine::session::Response {
                event_id: "evt_001".into(),
                action: "monitor".into(),
                marked_suspicious: false,
                timestamp: chrono::Utc::now(),
                correct_suspicion: true,
                correct_action: true,
                score: 50,
                duplicate: false,
            });

        tokio::time::advance(Duration::from_secs(60)).await;
        let reaped = store.reap_idle(Duration::from_secs(120)).await;
        assert!(reaped.is_empty());
        assert!(store.contains("busy"));
    }
}
