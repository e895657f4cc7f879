//! Error taxonomy and process exit codes.
//!
//! Every fallible path in the crate funnels into [`SiemulateError`], which
//! maps onto a stable set of process exit codes for scripting.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit codes returned by the `siemulate` binary.
pub struct ExitCode;

impl ExitCode {
    /// Clean exit.
    pub const SUCCESS: i32 = 0;
    /// Generic failure.
    pub const ERROR: i32 = 1;
    /// Configuration could not be loaded or validated.
    pub const CONFIG_ERROR: i32 = 2;
    /// Filesystem or socket I/O failure.
    pub const IO_ERROR: i32 = 3;
    /// HTTP server or client failure.
    pub const SERVER_ERROR: i32 = 4;
    /// Scenario engine rejected an operation.
    pub const ENGINE_ERROR: i32 = 5;
    /// Command-line usage error.
    pub const USAGE_ERROR: i32 = 64;
    /// Interrupted by SIGINT.
    pub const INTERRUPTED: i32 = 130;
    /// Terminated by SIGTERM.
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Aggregate Error
// ============================================================================

/// Top-level error type for all `siemulate` operations.
#[derive(Error, Debug)]
pub enum SiemulateError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scenario engine operation failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// HTTP server failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),

    /// Outbound HTTP request failed (drill client).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SiemulateError {
    /// Map this error to its process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Engine(_) => ExitCode::ENGINE_ERROR,
            Self::Server(_) | Self::Http(_) => ExitCode::SERVER_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Domain Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("configuration file not found: {path}")]
    MissingFile {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// Configuration file failed to parse.
    #[error("failed to parse {path}: {message}")]
    ParseError {
        /// File that failed.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A field value is outside its accepted range.
    #[error("invalid value for {field}: {value} (expected {expected})")]
    InvalidValue {
        /// Dotted field path.
        field: String,
        /// Offending value, rendered.
        value: String,
        /// Accepted range or form.
        expected: String,
    },
}

/// Scenario engine errors surfaced to callers.
///
/// The delivery scheduler never raises; these only come from the
/// request-driven operations (create, respond, summarize, remove).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No session under the given key.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Event id is not among the delivered events of the session.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// A session with this key already exists.
    #[error("session already exists: {0}")]
    SessionExists(String),
}

/// Convenience alias for fallible `siemulate` operations.
pub type Result<T> = std::result::Result<T, SiemulateError>;

// ============================================================================
// Tests
// ============================================================================
