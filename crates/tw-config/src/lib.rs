//! Threshwatch board threshold configuration.
//!
//! This crate provides:
//! - The boards document model: per-board expected sensor alarm thresholds
//!   (lolo/low/high/hihi), shared across the part numbers a board design
//!   ships under
//! - Document loading from a path or the embedded default
//! - Registry building with per-entry damage recovery

pub mod document;
pub mod error;
pub mod registry;
pub mod source;

pub use error::{ConfigError, ConfigResult};
pub use registry::{build_registry, BoardRegistry, BoardThresholds, SensorThreshold, ThresholdSet};
pub use source::{DocumentSource, DEFAULT_BOARDS_YAML, ENV_BOARDS_PATH};
