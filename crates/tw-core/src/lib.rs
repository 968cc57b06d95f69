//! Threshwatch core: registry store and threshold validator.
//!
//! The store holds the board threshold registry as an immutable snapshot
//! behind an atomic handle; a rebuild constructs a brand-new registry and
//! swaps it in, so readers never observe a partially-built one. The
//! validator compares the thresholds configured on a live monitoring point
//! against the registered expectations and reports each mismatch.

pub mod logging;
pub mod store;
pub mod validate;

pub use store::{RebuildStats, RegistryHandle};
pub use validate::{
    check_sensor_thresholds, FruIndex, ThreshKind, ThreshMask, ThresholdMismatch,
};
