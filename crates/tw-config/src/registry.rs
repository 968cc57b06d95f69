//! Board threshold registry model and builder.
//!
//! One conceptual board design is sold under several field-replaceable-unit
//! part numbers, so the builder assembles one sensor-threshold template per
//! board entry and then registers an independent copy of it under every
//! string in the board's `parts` list. The registry is built wholesale and
//! only read afterwards; a reload replaces it, never patches it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, warn};

use crate::document::{get, scalar_f64};
use crate::error::{ConfigError, ConfigResult};

/// The four alarm boundary values for one sensor.
///
/// A field the document failed to supply stays at 0.0; consumers must
/// tolerate partially-populated sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub low_low: f64,
    pub low: f64,
    pub high: f64,
    pub high_high: f64,
}

/// Expected thresholds for one named sensor on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorThreshold {
    /// Sensor display name as reported by the hardware, e.g. "AMC 2 +12V Cur".
    pub name: String,
    pub expected: ThresholdSet,
}

/// The sensor-threshold set registered under one part number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardThresholds {
    /// FRU part-number identifier as reported by the managed hardware.
    pub part_number: String,
    sensors: Vec<SensorThreshold>,
}

impl BoardThresholds {
    pub fn new(part_number: impl Into<String>) -> Self {
        BoardThresholds {
            part_number: part_number.into(),
            sensors: Vec::new(),
        }
    }

    /// Insert a sensor threshold. Duplicate names are last-wins: a later
    /// entry replaces the earlier one in place.
    pub fn insert_sensor(&mut self, sensor: SensorThreshold) {
        match self.sensors.iter_mut().find(|s| s.name == sensor.name) {
            Some(existing) => *existing = sensor,
            None => self.sensors.push(sensor),
        }
    }

    /// Look up a sensor's expected thresholds by display name.
    ///
    /// Exact string match, case-sensitive, no trimming.
    pub fn sensor(&self, name: &str) -> Option<&ThresholdSet> {
        self.sensors
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.expected)
    }

    pub fn sensors(&self) -> &[SensorThreshold] {
        &self.sensors
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// All board threshold sets, keyed by part number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardRegistry {
    boards: BTreeMap<String, BoardThresholds>,
}

impl BoardRegistry {
    pub fn new() -> Self {
        BoardRegistry::default()
    }

    /// Look up a board's thresholds by part number.
    ///
    /// Exact string match, case-sensitive, no trimming. An unknown part
    /// number is a normal condition, not an error.
    pub fn board(&self, part_number: &str) -> Option<&BoardThresholds> {
        self.boards.get(part_number)
    }

    pub fn insert(&mut self, board: BoardThresholds) {
        self.boards.insert(board.part_number.clone(), board);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardThresholds> {
        self.boards.values()
    }

    /// Number of registered part numbers.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Total sensor entries across all part numbers.
    pub fn sensor_count(&self) -> usize {
        self.boards.values().map(|b| b.sensors.len()).sum()
    }
}

/// Build a registry from a parsed boards document.
///
/// The top-level `boards` key must be a sequence; anything else aborts the
/// whole load. Everything below that degrades per entry: a board without
/// `parts` contributes nothing, a board without `sensors` registers its
/// parts with empty sensor sets, a malformed sensor entry is skipped, and
/// an unparseable numeric string leaves its field at the default.
pub fn build_registry(doc: &Value) -> ConfigResult<BoardRegistry> {
    let boards = get(doc, "boards")
        .and_then(Value::as_sequence)
        .ok_or_else(|| ConfigError::BadShape("'boards' key must be a sequence".into()))?;

    let mut registry = BoardRegistry::new();

    for (board_idx, board) in boards.iter().enumerate() {
        // A board without sensors still registers its parts, with empty
        // sensor sets; a board without parts contributes nothing at all.
        let sensors: &[Value] = match get(board, "sensors") {
            Some(node) => match node.as_sequence() {
                Some(seq) => seq.as_slice(),
                None => {
                    warn!(board = board_idx, "'sensors' must be a sequence, treating as empty");
                    &[]
                }
            },
            None => {
                debug!(board = board_idx, "board entry has no 'sensors'");
                &[]
            }
        };

        let mut template = BoardThresholds::new(String::new());
        for entry in sensors {
            if let Some(sensor) = parse_sensor(entry, board_idx) {
                template.insert_sensor(sensor);
            }
        }

        let Some(parts) = get(board, "parts").and_then(Value::as_sequence) else {
            // Nothing to key the thresholds by; the template is dropped.
            debug!(board = board_idx, "board entry has no 'parts' sequence, skipping");
            continue;
        };

        for part in parts {
            let Some(part) = part.as_str() else {
                warn!(board = board_idx, "non-string entry in 'parts', skipping");
                continue;
            };
            let mut copy = template.clone();
            copy.part_number = part.to_string();
            registry.insert(copy);
        }
    }

    Ok(registry)
}

/// Parse one sensor entry, or skip it.
///
/// `name`, `upper`, and `lower` are required; a missing or malformed one
/// skips the whole entry with a warning so the rest of the document still
/// loads.
fn parse_sensor(entry: &Value, board_idx: usize) -> Option<SensorThreshold> {
    let name = match get(entry, "name").and_then(Value::as_str) {
        Some(n) => n.to_string(),
        None => {
            warn!(board = board_idx, "sensor entry without a 'name' string, skipping");
            return None;
        }
    };

    let mut expected = ThresholdSet::default();

    let upper_ok = get(entry, "upper")
        .map(|n| parse_upper(n, &mut expected, &name))
        .unwrap_or(false);
    if !upper_ok {
        warn!(
            board = board_idx,
            sensor = %name,
            "'upper' must be a two-element sequence, skipping sensor"
        );
        return None;
    }

    let lower_ok = get(entry, "lower")
        .map(|n| parse_lower(n, &mut expected, &name))
        .unwrap_or(false);
    if !lower_ok {
        warn!(
            board = board_idx,
            sensor = %name,
            "'lower' must be a two-element sequence, skipping sensor"
        );
        return None;
    }

    Some(SensorThreshold { name, expected })
}

/// Parse the `upper` group. Format contract: position 0 = high, position 1 = hihi.
///
/// Returns false when the node is not a sequence of at least two elements.
/// A value that fails numeric parsing leaves its field at the default.
fn parse_upper(node: &Value, set: &mut ThresholdSet, sensor: &str) -> bool {
    let Some(seq) = node.as_sequence() else {
        return false;
    };
    if seq.len() < 2 {
        return false;
    }

    match scalar_f64(&seq[0]) {
        Some(v) => set.high = v,
        None => warn!(sensor, "could not parse 'high'"),
    }
    match scalar_f64(&seq[1]) {
        Some(v) => set.high_high = v,
        None => warn!(sensor, "could not parse 'hihi'"),
    }

    true
}

/// Parse the `lower` group. Format contract: position 0 = lolo, position 1 = low.
fn parse_lower(node: &Value, set: &mut ThresholdSet, sensor: &str) -> bool {
    let Some(seq) = node.as_sequence() else {
        return false;
    };
    if seq.len() < 2 {
        return false;
    }

    match scalar_f64(&seq[0]) {
        Some(v) => set.low_low = v,
        None => warn!(sensor, "could not parse 'lolo'"),
    }
    match scalar_f64(&seq[1]) {
        Some(v) => set.low = v,
        None => warn!(sensor, "could not parse 'low'"),
    }

    true
}
