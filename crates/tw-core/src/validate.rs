//! Live point threshold validation.
//!
//! A passive consistency check: given the thresholds currently configured
//! on a live analog input point, compare each hardware-readable threshold
//! kind against the registered expectation for that board and sensor. A
//! mismatch hints that the board's firmware or the boards document is
//! stale. Nothing is ever written back to the point.

use serde::{Deserialize, Serialize};
use tracing::warn;

use tw_config::{BoardRegistry, ThresholdSet};

/// The four alarm boundary kinds, conventionally named lolo/low/high/hihi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreshKind {
    #[serde(rename = "lolo")]
    LowLow,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "hihi")]
    HighHigh,
}

impl ThreshKind {
    pub const ALL: [ThreshKind; 4] = [
        ThreshKind::LowLow,
        ThreshKind::Low,
        ThreshKind::High,
        ThreshKind::HighHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreshKind::LowLow => "lolo",
            ThreshKind::Low => "low",
            ThreshKind::High => "high",
            ThreshKind::HighHigh => "hihi",
        }
    }

    fn value(&self, set: &ThresholdSet) -> f64 {
        match self {
            ThreshKind::LowLow => set.low_low,
            ThreshKind::Low => set.low,
            ThreshKind::High => set.high,
            ThreshKind::HighHigh => set.high_high,
        }
    }
}

impl std::fmt::Display for ThreshKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which threshold kinds the hardware reports as meaningful for a sensor.
///
/// Mirrors the IPMI per-sensor threshold readability flags (lower
/// critical, lower non-critical, upper non-critical, upper critical).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreshMask(u8);

impl ThreshMask {
    pub const LOLO: ThreshMask = ThreshMask(1 << 0);
    pub const LOW: ThreshMask = ThreshMask(1 << 1);
    pub const HIGH: ThreshMask = ThreshMask(1 << 2);
    pub const HIHI: ThreshMask = ThreshMask(1 << 3);

    pub const fn empty() -> Self {
        ThreshMask(0)
    }

    pub const fn all() -> Self {
        ThreshMask(0b1111)
    }

    pub fn readable(&self, kind: ThreshKind) -> bool {
        let bit = match kind {
            ThreshKind::LowLow => Self::LOLO,
            ThreshKind::Low => Self::LOW,
            ThreshKind::High => Self::HIGH,
            ThreshKind::HighHigh => Self::HIHI,
        };
        self.0 & bit.0 != 0
    }
}

impl std::ops::BitOr for ThreshMask {
    type Output = ThreshMask;

    fn bitor(self, rhs: ThreshMask) -> ThreshMask {
        ThreshMask(self.0 | rhs.0)
    }
}

/// One detected disagreement between a live point and the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMismatch {
    /// Control-system point name, for diagnostics.
    pub point: String,
    pub sensor: String,
    pub kind: ThreshKind,
    pub expected: f64,
    pub actual: f64,
}

impl std::fmt::Display for ThresholdMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: sensor '{}' {} mismatches expected value: expected {}, got {} from firmware",
            self.point, self.sensor, self.kind, self.expected, self.actual
        )
    }
}

/// Collaborator seam: resolves the FRU behind a live point to its part
/// number. A negative or unmapped slot resolves to `None`, which the
/// validator reports as an upstream wiring fault rather than a mismatch.
pub trait FruIndex {
    fn part_number(&self, slot: i32) -> Option<&str>;
}

/// Compare a live point's thresholds against the registry.
///
/// `part_number` is the FRU resolution result; `None` means the lookup
/// failed upstream. An unknown part number or sensor name is a normal,
/// silent condition: absence of configuration is not an error. Each
/// readable threshold kind is compared with exact floating-point equality
/// and yields at most one mismatch, so the result holds at most four
/// entries.
pub fn check_sensor_thresholds(
    registry: &BoardRegistry,
    point: &str,
    part_number: Option<&str>,
    sensor: &str,
    mask: ThreshMask,
    live: &ThresholdSet,
) -> Vec<ThresholdMismatch> {
    let Some(part_number) = part_number else {
        // Setup fault, not configuration drift; keep the categories apart.
        warn!(point, "FRU lookup failed, cannot check sensor thresholds");
        return Vec::new();
    };

    let Some(board) = registry.board(part_number) else {
        return Vec::new();
    };
    let Some(expected) = board.sensor(sensor) else {
        return Vec::new();
    };

    let mut mismatches = Vec::new();
    for kind in ThreshKind::ALL {
        if !mask.readable(kind) {
            continue;
        }

        let want = kind.value(expected);
        let got = kind.value(live);
        if want != got {
            warn!(
                point,
                sensor,
                kind = %kind,
                expected = want,
                actual = got,
                "sensor threshold mismatches expected value, firmware probably needs an update"
            );
            mismatches.push(ThresholdMismatch {
                point: point.to_string(),
                sensor: sensor.to_string(),
                kind,
                expected: want,
                actual: got,
            });
        }
    }

    mismatches
}
