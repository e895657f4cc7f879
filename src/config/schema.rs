//! Configuration schema types.
//!
//! Deserialized from YAML. Every field has a built-in default, so an
//! absent config file and an empty section are both valid; defaults
//! consult `SIEMULATE_*` environment variables first, which gives the
//! precedence file > environment > built-in.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;
use crate::error::ConfigError;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for the `siemulate` server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SiemulateConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Event delivery pacing.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Sequence generation settings.
    #[serde(default)]
    pub sequence: SequenceConfig,

    /// Session lifetime settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Fixed RNG seed for reproducible runs.
    #[serde(default = "default_seed", skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API server binds to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

/// Event delivery pacing. Each inter-event delay is drawn uniformly from
/// `[min_delay, max_delay]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Lower bound of the delivery delay.
    #[serde(default = "default_min_delay", with = "humantime_serde")]
    pub min_delay: Duration,

    /// Upper bound of the delivery delay.
    #[serde(default = "default_max_delay", with = "humantime_serde")]
    pub max_delay: Duration,
}

/// Sequence generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Events per generated sequence.
    #[serde(default = "default_sequence_length")]
    pub length: usize,

    /// Probability of preferring the benign pool per slot.
    #[serde(default = "default_benign_bias")]
    pub benign_bias: f64,
}

/// Session lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session is reaped.
    #[serde(default = "default_session_ttl", with = "humantime_serde")]
    pub ttl: Duration,

    /// How often the reaper scans the store.
    #[serde(default = "default_reap_interval", with = "humantime_serde")]
    pub reap_interval: Duration,
}

// ============================================================================
// Defaults
// ============================================================================

fn default_bind() -> SocketAddr {
    env_or("SIEMULATE_BIND", SocketAddr::from(([127, 0, 0, 1], 8000)))
}

fn default_min_delay() -> Duration {
    env_duration_or("SIEMULATE_MIN_DELAY", Duration::from_secs(3))
}

fn default_max_delay() -> Duration {
    env_duration_or("SIEMULATE_MAX_DELAY", Duration::from_secs(7))
}

fn default_sequence_length() -> usize {
    env_or("SIEMULATE_SEQUENCE_LENGTH", 16)
}

fn default_benign_bias() -> f64 {
    env_or("SIEMULATE_BENIGN_BIAS", 0.6)
}

fn default_session_ttl() -> Duration {
    env_duration_or("SIEMULATE_SESSION_TTL", Duration::from_secs(30 * 60))
}

fn default_reap_interval() -> Duration {
    env_duration_or("SIEMULATE_REAP_INTERVAL", Duration::from_secs(60))
}

fn default_seed() -> Option<u64> {
    std::env::var("SIEMULATE_SEED").ok().and_then(|v| v.parse().ok())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            min_delay: default_min_delay(),
            max_delay: default_max_delay(),
        }
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            length: default_sequence_length(),
            benign_bias: default_benign_bias(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: default_session_ttl(),
            reap_interval: default_reap_interval(),
        }
    }
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses a humantime duration from an environment variable.
fn env_duration_or(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| humantime::parse_duration(&v).ok())
        .unwrap_or(default)
}

// ============================================================================
// Validation and Conversion
// ============================================================================

impl SiemulateConfig {
    /// Check cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delivery.min_delay > self.delivery.max_delay {
            return Err(ConfigError::InvalidValue {
                field: "delivery.min_delay".to_string(),
                value: humantime::format_duration(self.delivery.min_delay).to_string(),
                expected: format!(
                    "at most max_delay ({})",
                    humantime::format_duration(self.delivery.max_delay)
                ),
            });
        }
        if self.sequence.length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sequence.length".to_string(),
                value: "0".to_string(),
                expected: "at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.sequence.benign_bias) {
            return Err(ConfigError::InvalidValue {
                field: "sequence.benign_bias".to_string(),
                value: self.sequence.benign_bias.to_string(),
                expected: "a probability in 0.0..=1.0".to_string(),
            });
        }
        if self.session.reap_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "session.reap_interval".to_string(),
                value: "0s".to_string(),
                expected: "a positive duration".to_string(),
            });
        }
        if self.session.ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "session.ttl".to_string(),
                value: "0s".to_string(),
                expected: "a positive duration".to_string(),
            });
        }
        Ok(())
    }

    /// Engine tunables derived from this configuration.
    #[must_use]
    pub const fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            sequence_length: self.sequence.length,
            benign_bias: self.sequence.benign_bias,
            min_delay: self.delivery.min_delay,
            max_delay: self.delivery.max_delay,
            session_ttl: self.session.ttl,
            reap_interval: self.session.reap_interval,
            seed: self.seed,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
