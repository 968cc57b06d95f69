//! Registry store with snapshot-and-swap rebuild.
//!
//! Readers take a cheap `Arc` snapshot and never block; a rebuild that
//! fails at the top level (unreadable file, broken YAML, bad `boards`
//! shape) leaves the previous snapshot in effect.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{error, info};

use tw_config::{build_registry, BoardRegistry, ConfigError, DocumentSource, ThresholdSet};

use crate::validate::{check_sensor_thresholds, FruIndex, ThreshMask, ThresholdMismatch};

/// Counts from a successful rebuild, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildStats {
    /// Registered part numbers.
    pub parts: usize,
    /// Sensor entries across all part numbers.
    pub sensors: usize,
}

/// Shared handle to the board threshold registry.
///
/// Created empty at process start; populated by [`rebuild`](Self::rebuild)
/// at startup and again whenever an operator re-points the document source.
pub struct RegistryHandle {
    current: ArcSwap<BoardRegistry>,
}

impl RegistryHandle {
    pub fn new() -> Self {
        RegistryHandle {
            current: ArcSwap::from_pointee(BoardRegistry::new()),
        }
    }

    /// Load the boards document and replace the registry wholesale.
    ///
    /// On failure the previous registry stays in effect and the error is
    /// both logged and returned.
    pub fn rebuild(&self, source: &DocumentSource) -> Result<RebuildStats, ConfigError> {
        let doc = source.load().map_err(|e| {
            error!(source = %source, error = %e, "boards document load failed, keeping previous registry");
            e
        })?;

        let registry = build_registry(&doc).map_err(|e| {
            error!(source = %source, error = %e, "boards document rejected, keeping previous registry");
            e
        })?;

        let stats = RebuildStats {
            parts: registry.len(),
            sensors: registry.sensor_count(),
        };

        self.current.store(Arc::new(registry));
        info!(
            source = %source,
            parts = stats.parts,
            sensors = stats.sensors,
            "board threshold registry rebuilt"
        );

        Ok(stats)
    }

    /// Current registry snapshot. Wait-free; the snapshot stays valid for
    /// as long as the caller holds it, across any number of rebuilds.
    pub fn snapshot(&self) -> Arc<BoardRegistry> {
        self.current.load_full()
    }

    /// Validate one live point against the current snapshot.
    ///
    /// Resolves the point's FRU through the collaborator index, then runs
    /// [`check_sensor_thresholds`].
    pub fn check_point<F: FruIndex>(
        &self,
        fru: &F,
        slot: i32,
        point: &str,
        sensor: &str,
        mask: ThreshMask,
        live: &ThresholdSet,
    ) -> Vec<ThresholdMismatch> {
        let snapshot = self.current.load();
        check_sensor_thresholds(&snapshot, point, fru.part_number(slot), sensor, mask, live)
    }
}

impl Default for RegistryHandle {
    fn default() -> Self {
        RegistryHandle::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    const DOC: &str = r#"
boards:
  - parts: ['X', 'Y']
    sensors:
      - name: 'Temp'
        upper: ['10.0', '12.0']
        lower: ['-5.0', '-2.0']
"#;

    fn write_doc(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn path_source(path: &Path) -> DocumentSource {
        DocumentSource::resolve(Some(path))
    }

    #[test]
    fn test_starts_empty() {
        let handle = RegistryHandle::new();
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn test_rebuild_populates_registry() {
        let file = write_doc(DOC);
        let handle = RegistryHandle::new();

        let stats = handle.rebuild(&path_source(file.path())).unwrap();
        assert_eq!(stats.parts, 2);
        assert_eq!(stats.sensors, 2);

        let snapshot = handle.snapshot();
        assert!(snapshot.board("X").is_some());
        assert!(snapshot.board("Y").is_some());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let file = write_doc(DOC);
        let handle = RegistryHandle::new();

        handle.rebuild(&path_source(file.path())).unwrap();
        let first = handle.snapshot();
        handle.rebuild(&path_source(file.path())).unwrap();
        let second = handle.snapshot();

        assert_eq!(*first, *second);
    }

    #[test]
    fn test_failed_rebuild_preserves_prior_state() {
        let good = write_doc(DOC);
        let handle = RegistryHandle::new();
        handle.rebuild(&path_source(good.path())).unwrap();

        let bad = write_doc("boards: 17\n");
        assert!(handle.rebuild(&path_source(bad.path())).is_err());

        let snapshot = handle.snapshot();
        let set = snapshot.board("X").unwrap().sensor("Temp").unwrap();
        assert_eq!(set.high, 10.0);
    }

    #[test]
    fn test_failed_first_rebuild_leaves_registry_empty() {
        let handle = RegistryHandle::new();
        let missing = path_source(Path::new("/nonexistent/boards.yaml"));
        assert!(handle.rebuild(&missing).is_err());
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn test_rebuild_replaces_rather_than_merges() {
        let first = write_doc(DOC);
        let handle = RegistryHandle::new();
        handle.rebuild(&path_source(first.path())).unwrap();

        let second = write_doc(
            r#"
boards:
  - parts: ['Z']
    sensors: []
"#,
        );
        handle.rebuild(&path_source(second.path())).unwrap();

        let snapshot = handle.snapshot();
        assert!(snapshot.board("X").is_none());
        assert!(snapshot.board("Z").is_some());
    }

    struct OneFru;

    impl FruIndex for OneFru {
        fn part_number(&self, slot: i32) -> Option<&str> {
            (slot == 0).then_some("X")
        }
    }

    #[test]
    fn test_check_point_through_snapshot() {
        let file = write_doc(DOC);
        let handle = RegistryHandle::new();
        handle.rebuild(&path_source(file.path())).unwrap();

        let live = ThresholdSet {
            low_low: -5.0,
            low: -2.0,
            high: 11.0,
            high_high: 12.0,
        };

        let found = handle.check_point(&OneFru, 0, "pt0", "Temp", ThreshMask::HIGH, &live);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].expected, 10.0);
        assert_eq!(found[0].actual, 11.0);

        // Negative slot = FRU resolution failure, reported upstream, no mismatches.
        let none = handle.check_point(&OneFru, -1, "pt0", "Temp", ThreshMask::HIGH, &live);
        assert!(none.is_empty());
    }

    #[test]
    fn test_old_snapshot_survives_rebuild() {
        let file = write_doc(DOC);
        let handle = RegistryHandle::new();
        handle.rebuild(&path_source(file.path())).unwrap();

        let held = handle.snapshot();
        let replacement = write_doc("boards: []\n");
        handle.rebuild(&path_source(replacement.path())).unwrap();

        // The held snapshot still answers as before the swap.
        assert!(held.board("X").is_some());
        assert!(handle.snapshot().is_empty());
    }
}
