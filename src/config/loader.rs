//! Configuration loading pipeline: read, parse, validate.
//!
//! The config file is optional; without one the defaults (including any
//! `SIEMULATE_*` environment overrides baked into them) are used as-is.

use std::path::Path;

use tracing::debug;

use crate::config::schema::SiemulateConfig;
use crate::error::ConfigError;

/// Load and validate configuration, from a file when one is given.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] when the path cannot be read,
/// [`ConfigError::ParseError`] for malformed YAML, and
/// [`ConfigError::InvalidValue`] when validation fails.
pub fn load(path: Option<&Path>) -> Result<SiemulateConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            from_file(path)?
        }
        None => SiemulateConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn from_file(path: &Path) -> Result<SiemulateConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;

    // Handle UTF-8 BOM
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    if raw.trim().is_empty() {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            message: "configuration file is empty".to_string(),
        });
    }

    serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
