//! `serve` command handler.
//!
//! Loads configuration, wires observability, and runs the HTTP server
//! until cancelled.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::config;
use crate::error::SiemulateError;
use crate::observability::EventEmitter;
use crate::server::{Server, ServerOptions};

/// Start the training API server.
///
/// # Errors
///
/// Returns a config error if the configuration fails to load or
/// validate, or a server error if the listener cannot bind.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), SiemulateError> {
    // Initialize Prometheus metrics if --metrics-port is provided
    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    if let Some(ref path) = args.config {
        tracing::info!(config = %path.display(), "loading configuration");
    }
    let mut config = config::load(args.config.as_deref())?;

    // CLI flags win over the file and the environment.
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let emitter = if let Some(ref path) = args.events_file {
        Arc::new(EventEmitter::from_file(path)?)
    } else {
        Arc::new(EventEmitter::stderr())
    };

    let server = Server::new(ServerOptions {
        config,
        emitter,
        cancel,
    });
    server.run().await
}
