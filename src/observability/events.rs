//! Structured audit event stream.
//!
//! Discrete, typed events emitted as the engine runs: session lifecycle,
//! deliveries, and graded responses. Events are serialized as
//! newline-delimited JSON (JSONL) and include a monotonically increasing
//! sequence number for ordering guarantees.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::event::Severity;

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// A discrete event emitted during engine operation.
///
/// Each variant is tagged with `"type"` when serialized to JSON so consumers
/// can dispatch on the event kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The server is bound and accepting requests.
    ServerStarted {
        /// When the server started.
        timestamp: DateTime<Utc>,
        /// Socket address the server bound.
        bind_addr: String,
    },

    /// The server has stopped.
    ServerStopped {
        /// When the server stopped.
        timestamp: DateTime<Utc>,
        /// Human-readable stop reason.
        reason: String,
    },

    /// A scenario session was created and its delivery task spawned.
    SessionStarted {
        /// When the session started.
        timestamp: DateTime<Utc>,
        /// Session key.
        session_id: String,
        /// Scenario id recorded on the session.
        scenario_id: String,
        /// Number of events the session will deliver.
        sequence_length: usize,
    },

    /// One event was released into a session's feed.
    EventDelivered {
        /// Delivery time (same instant stamped on the event).
        timestamp: DateTime<Utc>,
        /// Session key.
        session_id: String,
        /// Sequence id of the released event.
        event_id: String,
        /// 1-based position within the sequence.
        position: usize,
        /// Severity of the released event.
        level: Severity,
    },

    /// A session delivered its final event; the task ended naturally.
    SequenceCompleted {
        /// When the final event was delivered.
        timestamp: DateTime<Utc>,
        /// Session key.
        session_id: String,
        /// Total events delivered.
        delivered: usize,
    },

    /// A triage response was graded and recorded.
    ResponseScored {
        /// Submission time.
        timestamp: DateTime<Utc>,
        /// Session key.
        session_id: String,
        /// Event the trainee responded to.
        event_id: String,
        /// Awarded score (0, 25, or 50).
        score: u32,
        /// Suspicion call matched ground truth.
        correct_suspicion: bool,
        /// Action matched the response policy.
        correct_action: bool,
        /// A previous response for the same event existed.
        duplicate: bool,
    },

    /// A session was removed on request.
    SessionRemoved {
        /// When the removal happened.
        timestamp: DateTime<Utc>,
        /// Session key.
        session_id: String,
    },

    /// The TTL reaper collected an idle session.
    SessionExpired {
        /// When the reap happened.
        timestamp: DateTime<Utc>,
        /// Session key.
        session_id: String,
    },
}

// ---------------------------------------------------------------------------
// Envelope (adds sequence number via serde flatten)
// ---------------------------------------------------------------------------

/// Wraps an [`Event`] with a monotonically increasing sequence number.
#[derive(Debug, Serialize)]
struct EventEnvelope {
    /// Zero-based, monotonically increasing sequence counter.
    sequence: u64,
    /// The wrapped event (flattened into the same JSON object).
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Thread-safe, buffered JSONL event writer.
///
/// Each call to [`emit`](Self::emit) atomically increments the sequence
/// counter, serializes the event as a single JSON line, and flushes the
/// underlying writer.  Serialization or I/O failures are silently dropped
/// because observability must never crash the server.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

// Box<dyn Write> is not Debug; report only the sequence counter.
impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Creates an emitter that writes to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates an emitter that writes to stderr, keeping stdout free for
    /// command output.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates an emitter that silently discards all events.
    ///
    /// Used in quiet mode and in tests that do not assert on the stream.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Creates an emitter that writes to a file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or opened.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Emits an event as a single JSONL line.
    ///
    /// Failures are silently dropped; observability must not crash the
    /// server.
    pub fn emit(&self, event: Event) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = EventEnvelope {
            sequence: seq,
            event,
        };

        if let Ok(mut w) = self.writer.lock() {
            if let Ok(line) = serde_json::to_string(&envelope) {
                let _ = writeln!(w, "{line}");
                let _ = w.flush();
            }
        }
    }

    /// Returns the number of events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
