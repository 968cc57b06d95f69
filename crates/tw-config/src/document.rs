//! Boards document loading and scalar parsing.
//!
//! The document is parsed into a generic `serde_yaml::Value` tree rather
//! than a rigid serde struct so that damage stays local: one malformed
//! sensor entry must not take down the rest of the load. The builder in
//! [`crate::registry`] walks the tree and decides what is fatal.

use std::path::Path;

use serde_yaml::Value;

use crate::error::{ConfigError, ConfigResult};

/// Load and parse a boards document from a file.
pub fn load_file(path: &Path) -> ConfigResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_str(&content, &path.display().to_string())
}

/// Parse a boards document from a string.
///
/// `origin` names the source in diagnostics (a path, or "builtin default").
pub fn parse_str(content: &str, origin: &str) -> ConfigResult<Value> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

/// Parse a scalar node as a 64-bit float, strictly.
///
/// Accepts a YAML string holding a number ("10.0", the shape the document
/// format uses) or a bare YAML number. String parsing is locale-independent
/// and rejects trailing garbage; surrounding whitespace is tolerated.
pub fn scalar_f64(node: &Value) -> Option<f64> {
    match node {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Borrow a mapping entry by string key. Non-mapping nodes yield `None`.
pub fn get<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_f64_from_string() {
        assert_eq!(scalar_f64(&Value::from("10.0")), Some(10.0));
        assert_eq!(scalar_f64(&Value::from("-2.5")), Some(-2.5));
        assert_eq!(scalar_f64(&Value::from(" 3.0 ")), Some(3.0));
    }

    #[test]
    fn test_scalar_f64_rejects_trailing_garbage() {
        assert_eq!(scalar_f64(&Value::from("10.0V")), None);
        assert_eq!(scalar_f64(&Value::from("abc")), None);
        assert_eq!(scalar_f64(&Value::from("")), None);
    }

    #[test]
    fn test_scalar_f64_from_number() {
        assert_eq!(scalar_f64(&Value::from(12.5)), Some(12.5));
        assert_eq!(scalar_f64(&Value::from(7)), Some(7.0));
    }

    #[test]
    fn test_scalar_f64_rejects_non_scalars() {
        assert_eq!(scalar_f64(&Value::Sequence(vec![])), None);
        assert_eq!(scalar_f64(&Value::Null), None);
    }

    #[test]
    fn test_parse_str_reports_origin() {
        let err = parse_str("boards: [", "inline").unwrap_err();
        assert!(err.to_string().contains("inline"));
    }
}
