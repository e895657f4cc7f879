//! Server runtime wiring the engine, session reaper, and HTTP listener.
//!
//! [`Server`] owns the engine for its whole lifetime; the axum router only
//! sees it through [`ApiState`]. Shutdown is cooperative: cancelling the
//! token drains the listener, the reaper, and every delivery task.

use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::{self, ApiState};
use crate::config::SiemulateConfig;
use crate::engine::Engine;
use crate::error::SiemulateError;
use crate::observability::events::{Event, EventEmitter};

/// Options for constructing a [`Server`].
pub struct ServerOptions {
    /// Loaded and validated configuration.
    pub config: SiemulateConfig,
    /// Emitter for structured audit events.
    pub emitter: Arc<EventEmitter>,
    /// Token for cooperative shutdown.
    pub cancel: CancellationToken,
}

/// Training backend runtime.
pub struct Server {
    config: SiemulateConfig,
    engine: Arc<Engine>,
    emitter: Arc<EventEmitter>,
    cancel: CancellationToken,
}

impl Server {
    /// Create a server and its engine from the given options.
    #[must_use]
    pub fn new(opts: ServerOptions) -> Self {
        let engine = Arc::new(Engine::new(
            opts.config.engine_options(),
            Arc::clone(&opts.emitter),
            opts.cancel.clone(),
        ));

        Self {
            config: opts.config,
            engine,
            emitter: opts.emitter,
            cancel: opts.cancel,
        }
    }

    /// The engine backing this server.
    #[must_use]
    pub const fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Bind the listener and serve until the cancellation token fires.
    ///
    /// # Errors
    ///
    /// Returns [`SiemulateError::Server`] when the listener cannot bind or
    /// the HTTP server fails.
    pub async fn run(&self) -> Result<(), SiemulateError> {
        let listener = TcpListener::bind(self.config.server.bind)
            .await
            .map_err(|e| {
                SiemulateError::Server(format!("bind {} failed: {e}", self.config.server.bind))
            })?;
        let bound_addr = listener
            .local_addr()
            .map_err(|e| SiemulateError::Server(format!("local_addr failed: {e}")))?;

        self.emitter.emit(Event::ServerStarted {
            timestamp: Utc::now(),
            bind_addr: bound_addr.to_string(),
        });
        info!(%bound_addr, "API server started");

        let reaper_handle = self.engine.start_reaper();

        let state = Arc::new(ApiState::new(Arc::clone(&self.engine)));
        let router = api::build_router(state);

        let cancel = self.cancel.clone();
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await
            .map_err(|e| SiemulateError::Server(format!("serve failed: {e}")));

        // The reaper exits on cancellation by itself; abort covers the
        // serve-error path where the token never fired.
        reaper_handle.abort();

        self.emitter.emit(Event::ServerStopped {
            timestamp: Utc::now(),
            reason: match &result {
                Ok(()) => "shutdown".to_string(),
                Err(e) => format!("error: {e}"),
            },
        });
        debug!("API server shut down");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Duration;

    fn test_options(cancel: CancellationToken) -> ServerOptions {
        let mut config = SiemulateConfig::default();
        // Port 0 avoids collisions between parallel tests.
        config.server.bind = SocketAddr::from(([127, 0, 0, 1], 0));
        ServerOptions {
            config,
            emitter: Arc::new(EventEmitter::noop()),
            cancel,
        }
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let cancel = CancellationToken::new();
        let server = Server::new(test_options(cancel.clone()));
        let emitter = Arc::clone(&server.emitter);

        let handle = tokio::spawn(async move { server.run().await });

        // Give the listener a moment to come up, then request shutdown.
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not shut down")
            .unwrap();
        assert!(result.is_ok());

        // ServerStarted and ServerStopped were both emitted.
        assert_eq!(emitter.event_count(), 2);
    }

    #[tokio::test]
    async fn test_engine_uses_configured_options() {
        let cancel = CancellationToken::new();
        let mut opts = test_options(cancel);
        opts.config.sequence.length = 3;

        let server = Server::new(opts);
        let receipt = server.engine().start_session("s1", "x").unwrap();
        assert_eq!(receipt.sequence_length, 3);
    }
}
