//! Configuration loading errors.
//!
//! Only failures that abort an entire load are represented here. Per-entry
//! damage (an unparseable numeric string, a malformed sensor entry) is
//! recovered inline by the builder: logged, skipped, and the rest of the
//! document still loads.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for document loading and registry building.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort a registry load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("bad document shape: {0}")]
    BadShape(String),
}
