//! File-based round-trip tests: write a boards document to disk, load it
//! through the source resolver, and check registry lookups.

use std::io::Write;

use tw_config::{build_registry, DocumentSource};

const DOC: &str = r#"
boards:
  - parts: ['X', 'Y']
    sensors:
      - name: 'Temp'
        upper: ['10.0', '12.0']
        lower: ['-5.0', '-2.0']
"#;

fn write_doc(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write document");
    file
}

#[test]
fn load_from_file_and_lookup() {
    let file = write_doc(DOC);
    let source = DocumentSource::resolve(Some(file.path()));

    let doc = source.load().expect("document loads");
    let registry = build_registry(&doc).expect("registry builds");

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.sensor_count(), 2);

    for part in ["X", "Y"] {
        let set = registry
            .board(part)
            .expect("part registered")
            .sensor("Temp")
            .expect("sensor registered");
        assert_eq!(set.low_low, -5.0);
        assert_eq!(set.low, -2.0);
        assert_eq!(set.high, 10.0);
        assert_eq!(set.high_high, 12.0);
    }
}

#[test]
fn rebuild_from_identical_document_is_idempotent() {
    let file = write_doc(DOC);
    let source = DocumentSource::resolve(Some(file.path()));

    let first = build_registry(&source.load().unwrap()).unwrap();
    let second = build_registry(&source.load().unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn unreadable_file_is_an_io_error() {
    let source = DocumentSource::resolve(Some(std::path::Path::new(
        "/nonexistent/threshwatch/boards.yaml",
    )));
    let err = source.load().unwrap_err();
    assert!(matches!(err, tw_config::ConfigError::Io { .. }));
}

#[test]
fn syntactically_broken_document_is_a_parse_error() {
    let file = write_doc("boards: [\n");
    let source = DocumentSource::resolve(Some(file.path()));
    let err = source.load().unwrap_err();
    assert!(matches!(err, tw_config::ConfigError::Parse { .. }));
}
